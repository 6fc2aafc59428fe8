//! Export options and file naming.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Filename used when the host configures none.
pub const DEFAULT_FILENAME: &str = "table-export";

/// Document title used when the host configures none.
pub const DEFAULT_TITLE: &str = "Table Export";

/// Host-facing export settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub csv_enabled: bool,
    #[serde(default)]
    pub pdf_enabled: bool,
    /// Append a UTC timestamp to the filename.
    #[serde(default)]
    pub date_time_stamp: bool,
}

impl ExportConfig {
    pub fn filename(&self) -> &str {
        self.filename
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
    }

    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Formats the host enabled, in toolbar order.
    pub fn enabled_formats(&self) -> Vec<ExportFormat> {
        let mut formats = Vec::new();
        if self.csv_enabled {
            formats.push(ExportFormat::Csv);
        }
        if self.pdf_enabled {
            formats.push(ExportFormat::Pdf);
        }
        formats
    }

    /// Whether the export toolbar is shown at all.
    pub fn shows_toolbar(&self) -> bool {
        self.csv_enabled || self.pdf_enabled
    }

    /// Output path for `format` inside `dir`, stamped with `now` when enabled.
    pub fn output_path(&self, dir: &Path, format: ExportFormat, now: DateTime<Utc>) -> PathBuf {
        let stamp = self.date_time_stamp.then_some(now);
        dir.join(export_file_name(self.filename(), format, stamp))
    }
}

/// Export sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
    /// Bordered plain-text preview.
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(format!(
                "Invalid export format: '{}'. Expected 'csv', 'pdf' or 'text'.",
                other
            )),
        }
    }
}

/// `<base>.<ext>`, or `<base>_<timestamp>.<ext>` where the timestamp is
/// ISO-8601 UTC with `:` and `.` replaced by `-` (e.g.
/// `2024-03-05T14-07-09-120Z`).
pub fn export_file_name(base: &str, format: ExportFormat, stamp: Option<DateTime<Utc>>) -> String {
    match stamp {
        None => format!("{}.{}", base, format.extension()),
        Some(at) => {
            let iso = at
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .replace([':', '.'], "-");
            format!("{}_{}.{}", base, iso, format.extension())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.filename(), "table-export");
        assert_eq!(config.title(), "Table Export");
        assert!(!config.shows_toolbar());
        assert!(config.enabled_formats().is_empty());
    }

    #[test]
    fn file_name_with_and_without_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
            + chrono::Duration::milliseconds(120);
        assert_eq!(export_file_name("report", ExportFormat::Csv, None), "report.csv");
        assert_eq!(
            export_file_name("report", ExportFormat::Pdf, Some(at)),
            "report_2024-03-05T14-07-09-120Z.pdf"
        );
    }

    #[test]
    fn output_path_respects_stamp_flag() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut config = ExportConfig {
            filename: Some("sales".into()),
            ..Default::default()
        };
        assert_eq!(
            config.output_path(Path::new("/tmp"), ExportFormat::Csv, at),
            PathBuf::from("/tmp/sales.csv")
        );
        config.date_time_stamp = true;
        assert_eq!(
            config.output_path(Path::new("/tmp"), ExportFormat::Csv, at),
            PathBuf::from("/tmp/sales_2024-01-01T00-00-00-000Z.csv")
        );
    }

    #[test]
    fn enabled_formats_in_toolbar_order() {
        let config: ExportConfig =
            serde_json::from_str(r#"{"csvEnabled": true, "pdfEnabled": true}"#).unwrap();
        assert_eq!(config.enabled_formats(), vec![ExportFormat::Csv, ExportFormat::Pdf]);
    }

    #[test]
    fn parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("txt".parse::<ExportFormat>(), Ok(ExportFormat::Text));
        assert!("xls".parse::<ExportFormat>().is_err());
    }
}
