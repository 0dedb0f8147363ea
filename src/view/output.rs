//! Apply output line classification

use serde::Serialize;

/// Kind of a `kubectl apply` output line, used only for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputLineKind {
    Warning,
    Configured,
    Error,
    DryRun,
    Plain,
}

/// Classify one output line (the line itself is never altered)
pub fn classify_output_line(line: &str) -> OutputLineKind {
    let line = line.trim();
    if is_warning(line) {
        OutputLineKind::Warning
    } else if line.ends_with("configured") {
        OutputLineKind::Configured
    } else if line.contains("unable to recognize") || line.starts_with("error:") {
        OutputLineKind::Error
    } else if line.contains("dry run") {
        OutputLineKind::DryRun
    } else {
        OutputLineKind::Plain
    }
}

/// Whether any line of `output` is a kubectl warning
pub fn has_warnings(output: &str) -> bool {
    output.split('\n').any(|line| is_warning(line.trim()))
}

fn is_warning(trimmed: &str) -> bool {
    trimmed.starts_with("Warning:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_output_line() {
        assert_eq!(
            classify_output_line("  Warning: batch/v1beta1 CronJob is deprecated"),
            OutputLineKind::Warning
        );
        assert_eq!(
            classify_output_line("deployment.apps/api configured"),
            OutputLineKind::Configured
        );
        assert_eq!(
            classify_output_line("error: unable to read kustomization"),
            OutputLineKind::Error
        );
        assert_eq!(
            classify_output_line("unable to recognize \"STDIN\": no matches for kind"),
            OutputLineKind::Error
        );
        assert_eq!(
            classify_output_line("service/api created (server dry run)"),
            OutputLineKind::DryRun
        );
        assert_eq!(
            classify_output_line("service/api unchanged"),
            OutputLineKind::Plain
        );
    }

    #[test]
    fn test_has_warnings() {
        assert!(has_warnings("a unchanged\n  Warning: deprecated\nb configured"));
        assert!(!has_warnings("a unchanged\nsome Warning: inline"));
        assert!(!has_warnings(""));
    }
}
