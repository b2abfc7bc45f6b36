//! Campaign composition
//!
//! Builds a campaign draft from user input and validates it before any
//! request is issued: recipient normalization and deduplication, the
//! credit-balance cap, and attachment rules.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::multipart::{Form, Part};

use crate::utils::errors::{DraftError, Result};

/// Advisory message length shown by the composer's character counter;
/// submission is never blocked on length.
pub const MAX_MESSAGE_CHARS: usize = 1024;
/// Images must be JPEG and at most this many bytes
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;
/// PDF/video attachments are capped at this many bytes each
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

fn ten_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{10}$").expect("valid regex"))
}

/// Normalize a raw recipient entry to a 10-digit number.
///
/// Non-digit characters are stripped; a 12-digit number with the "91"
/// country code is reduced to its last 10 digits. Anything that does not
/// come out as exactly 10 digits is rejected.
pub fn normalize_recipient(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = if digits.len() == 12 && digits.starts_with("91") {
        digits[2..].to_string()
    } else {
        digits
    };

    if ten_digits().is_match(&digits) {
        Some(digits)
    } else {
        None
    }
}

/// Outcome of one recipient intake batch
#[derive(Debug, Clone, Default)]
pub struct RecipientBatch {
    /// Numbers newly added to the draft
    pub accepted: usize,
    /// Entries that did not reduce to 10 digits
    pub invalid: Vec<String>,
}

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A campaign under composition
#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
    campaign_name: String,
    message: String,
    recipients: Vec<String>,
    images: Vec<Attachment>,
    documents: Vec<Attachment>,
}

impl CampaignDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_campaign_name(&mut self, name: impl Into<String>) {
        self.campaign_name = name.into();
    }

    pub fn campaign_name(&self) -> &str {
        &self.campaign_name
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message length for the "{n} / 1024 Characters" counter
    pub fn char_count(&self) -> usize {
        self.message.chars().count()
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Parse a free-text batch of phone numbers (comma or whitespace
    /// separated), normalize and deduplicate them, and add them to the
    /// draft.
    ///
    /// The whole batch is refused when the resulting unique count would
    /// exceed `available_credits`; nothing is partially applied.
    pub fn add_recipients(
        &mut self,
        input: &str,
        available_credits: u64,
    ) -> std::result::Result<RecipientBatch, DraftError> {
        let mut batch = RecipientBatch::default();
        let mut merged = self.recipients.clone();

        for entry in input.split(|c: char| c.is_whitespace() || c == ',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match normalize_recipient(entry) {
                Some(number) => {
                    if !merged.contains(&number) {
                        merged.push(number);
                        batch.accepted += 1;
                    }
                }
                None => batch.invalid.push(entry.to_string()),
            }
        }

        if merged.len() as u64 > available_credits {
            return Err(DraftError::ExceedsCredits {
                requested: merged.len() as u64,
                available: available_credits,
            });
        }

        self.recipients = merged;
        Ok(batch)
    }

    pub fn remove_recipient(&mut self, index: usize) {
        if index < self.recipients.len() {
            self.recipients.remove(index);
        }
    }

    /// Attach a JPEG image, enforcing type and size limits
    pub fn add_image(&mut self, attachment: Attachment) -> std::result::Result<(), DraftError> {
        if attachment.content_type != "image/jpeg" || attachment.bytes.len() > MAX_IMAGE_BYTES {
            return Err(DraftError::InvalidImage {
                file_name: attachment.file_name,
                max_bytes: MAX_IMAGE_BYTES,
            });
        }
        self.images.push(attachment);
        Ok(())
    }

    /// Attach a PDF or video document, enforcing the per-file size limit
    pub fn add_document(&mut self, attachment: Attachment) -> std::result::Result<(), DraftError> {
        if attachment.bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(DraftError::AttachmentTooLarge {
                file_name: attachment.file_name,
                max_bytes: MAX_DOCUMENT_BYTES,
            });
        }
        self.documents.push(attachment);
        Ok(())
    }

    /// Validate the draft against the available credit balance. All
    /// failures here happen before any request is sent.
    pub fn validate(&self, available_credits: u64) -> std::result::Result<(), DraftError> {
        if self.campaign_name.trim().is_empty() {
            return Err(DraftError::NameRequired);
        }
        if self.recipients.is_empty() {
            return Err(DraftError::NoRecipients);
        }
        if self.message.trim().is_empty() {
            return Err(DraftError::MessageRequired);
        }
        if self.recipients.len() as u64 > available_credits {
            return Err(DraftError::ExceedsCredits {
                requested: self.recipients.len() as u64,
                available: available_credits,
            });
        }
        Ok(())
    }

    /// Newline-joined recipient list for the downloadable plain-text
    /// artifact; built entirely from memory.
    pub fn recipients_export(&self) -> String {
        self.recipients.join("\n")
    }

    /// Build the multipart body for POST /campaign/create
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new()
            .text("campaignName", self.campaign_name)
            .text("message", self.message);

        for number in self.recipients {
            form = form.text("phoneNumbers", number);
        }
        for image in self.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }
        for doc in self.documents {
            let part = Part::bytes(doc.bytes)
                .file_name(doc.file_name)
                .mime_str(&doc.content_type)?;
            form = form.part("pdfVideo", part);
        }

        Ok(form)
    }
}
