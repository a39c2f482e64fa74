// Export delivery. Generated files are written into an outbox directory
// together with an HTML summary addressed to the configured recipient;
// the mail gateway of the host environment picks the batch up from there.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::EngineError;
use crate::models::GeneratedFile;

pub struct Outbox {
    dir: PathBuf,
}

impl Outbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Outbox { dir: dir.into() }
    }

    /// Writes all files of a batch plus the summary document. Returns the
    /// paths written. LODAS files use CRLF line endings.
    pub fn deliver(
        &self,
        recipient: &str,
        batch_id: Uuid,
        files: &[GeneratedFile],
    ) -> Result<Vec<PathBuf>, EngineError> {
        if files.is_empty() {
            return Err(EngineError::DeliveryError(
                "No files were generated. Check error logs.".to_string(),
            ));
        }

        fs::create_dir_all(&self.dir)?;
        let mut written = Vec::with_capacity(files.len() + 1);

        for file in files {
            let path = self.dir.join(&file.filename);
            fs::write(&path, file.content.replace('\n', "\r\n"))?;
            written.push(path);
        }

        let summary_path = self
            .dir
            .join(format!("DATEV_LODAS_Export_{}.html", batch_id));
        fs::write(&summary_path, summary_message(recipient, files))?;
        written.push(summary_path);

        tracing::info!(
            recipient,
            %batch_id,
            file_count = files.len(),
            outbox = %self.dir.display(),
            "Queued export delivery"
        );

        Ok(written)
    }
}

/// Builds the HTML summary for a batch: one table row per generated file.
pub fn summary_message(recipient: &str, files: &[GeneratedFile]) -> String {
    let mut message = String::new();
    message.push_str(&format!("<p>To: {}</p>\n", recipient));
    message.push_str("<p>DATEV LODAS export completed successfully.</p>\n");
    message.push_str("<table border='1' cellpadding='5' style='border-collapse: collapse;'>\n");
    message.push_str("<tr><th>Company</th><th>Employees</th><th>File</th></tr>\n");

    for file in files {
        message.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            file.company, file.employee_count, file.filename
        ));
    }

    message.push_str("</table>\n");
    message.push_str("<p>The export flags for these employees have been reset.</p>\n");
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_file() -> GeneratedFile {
        GeneratedFile {
            filename: "DATEV_LODAS_Acme_GmbH_20240317093000.txt".to_string(),
            company: "Acme GmbH".to_string(),
            employee_count: 2,
            children_count: 1,
            content: "[Allgemein]\nZiel=Lodas\n".to_string(),
        }
    }

    #[test]
    fn deliver_writes_files_with_crlf_and_a_summary() {
        let dir = tempdir().expect("temp dir");
        let outbox = Outbox::new(dir.path());
        let batch_id = Uuid::new_v4();

        let written = outbox
            .deliver("payroll@example.com", batch_id, &[sample_file()])
            .expect("deliver");
        assert_eq!(written.len(), 2);

        let lodas = fs::read(&written[0]).expect("read lodas file");
        assert!(String::from_utf8_lossy(&lodas).contains("[Allgemein]\r\nZiel=Lodas\r\n"));

        let summary = fs::read_to_string(&written[1]).expect("read summary");
        assert!(summary.contains("To: payroll@example.com"));
        assert!(summary.contains("<td>Acme GmbH</td><td>2</td>"));
    }

    #[test]
    fn deliver_rejects_empty_batches() {
        let dir = tempdir().expect("temp dir");
        let outbox = Outbox::new(dir.path());
        assert!(outbox
            .deliver("payroll@example.com", Uuid::new_v4(), &[])
            .is_err());
    }

    #[test]
    fn summary_lists_every_file() {
        let mut second = sample_file();
        second.filename = "DATEV_LODAS_Beta_GmbH_20240317093000.txt".to_string();
        second.company = "Beta GmbH".to_string();

        let message = summary_message("payroll@example.com", &[sample_file(), second]);
        assert!(message.contains("Acme GmbH"));
        assert!(message.contains("Beta GmbH"));
    }
}
