//! Attachment operations for the Confluence API.

use rand::RngExt;
use tracing::{debug, info};

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::AttachmentsPage;

impl ConfluenceClient {
    /// Fetch one page of the attachment listing.
    ///
    /// `path` is server-relative: either the initial listing path or the
    /// continuation path the server returned under `_links.next`.
    pub(crate) fn list_attachments(
        &self,
        path: &str,
    ) -> Result<AttachmentsPage, ConfluenceError> {
        let url = format!("{}{}", self.base_url, path);

        debug!("Listing attachments: {}", path);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        Self::error_for_status(status, &mut body_reader)?;

        Ok(body_reader.read_json()?)
    }

    /// Upload attachment data to a precomputed endpoint.
    ///
    /// The endpoint is either the page's attachment collection (create) or
    /// an update-by-id data endpoint; the caller decided which when the
    /// registry was built.
    pub(crate) fn upload_attachment(
        &self,
        upload_url: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), ConfluenceError> {
        info!("Uploading attachment '{}'", filename);

        let boundary = format!("----NbstageFormBoundary{:016x}", rand::rng().random::<u64>());
        let mut body = Vec::new();

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("Content-Type: {}\r\n\r\n", content_type_for(filename)).as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let response = self
            .agent
            .post(upload_url)
            .header("Authorization", &self.auth_header)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        Self::error_for_status(status, &mut body_reader)?;

        Ok(())
    }
}

/// Content type for an attachment, from its filename extension.
fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("output_6_0.png"), "image/png");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(
            content_type_for("notebook.ipynb"),
            "application/octet-stream"
        );
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
