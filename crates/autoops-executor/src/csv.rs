//! CSV rendering of the audit log.

use autoops_db::LogEntry;

const HEADER: &str = "id,task,timestamp";

/// Render `rows` with a header line, in the order given
pub fn render_logs(rows: &[LogEntry]) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');

    for row in rows {
        output.push_str(&row.id.to_string());
        output.push(',');
        output.push_str(&escape_field(&row.task));
        output.push(',');
        output.push_str(&escape_field(&row.timestamp));
        output.push('\n');
    }

    output
}

/// Quote a field when it contains a separator, a quote or a line break
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, task: &str) -> LogEntry {
        LogEntry {
            id,
            task: task.to_string(),
            timestamp: "2024-01-01T00:00:00.000000".to_string(),
        }
    }

    #[test]
    fn test_empty_log_renders_header_only() {
        assert_eq!(render_logs(&[]), "id,task,timestamp\n");
    }

    #[test]
    fn test_rows_keep_given_order() {
        let csv = render_logs(&[entry(2, "Backup completed"), entry(1, "Report generated")]);
        assert_eq!(
            csv,
            "id,task,timestamp\n\
             2,Backup completed,2024-01-01T00:00:00.000000\n\
             1,Report generated,2024-01-01T00:00:00.000000\n"
        );
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("hello, world"), "\"hello, world\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }
}
