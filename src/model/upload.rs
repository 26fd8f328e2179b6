//! Upload form state and validation
//!
//! Uploads are simulated: a valid form produces a confirmation and is reset,
//! nothing is stored.

use super::contract::ContractType;
use std::path::Path;

pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];
pub const UPLOAD_SUCCESS: &str = "Contract uploaded successfully";
pub const MISSING_FILE: &str = "Please select a file to upload";

/// Which input of the upload form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadField {
    #[default]
    FilePath,
    Name,
    ContractType,
}

impl UploadField {
    pub fn next(self) -> Self {
        match self {
            UploadField::FilePath => UploadField::Name,
            UploadField::Name => UploadField::ContractType,
            UploadField::ContractType => UploadField::FilePath,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            UploadField::FilePath => UploadField::ContractType,
            UploadField::Name => UploadField::FilePath,
            UploadField::ContractType => UploadField::Name,
        }
    }
}

/// Type choices offered by the form
pub fn upload_type_options() -> Vec<(&'static str, ContractType)> {
    vec![
        ("NDA", ContractType::Nda),
        ("Service Agreement", ContractType::ServiceAgreement),
        ("Employment Contract", ContractType::Employment),
        ("Other", ContractType::Other("Other".to_string())),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub file_path: String,
    pub name: String,
    /// Index into `upload_type_options()`, None until chosen
    pub type_index: Option<usize>,
    pub focus: UploadField,
}

impl UploadForm {
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            UploadField::FilePath => self.file_path.push(c),
            UploadField::Name => self.name.push(c),
            UploadField::ContractType => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            UploadField::FilePath => {
                self.file_path.pop();
            }
            UploadField::Name => {
                self.name.pop();
            }
            UploadField::ContractType => self.type_index = None,
        }
    }

    /// Step through the type options, wrapping at either end
    pub fn cycle_type(&mut self, forward: bool) {
        let count = upload_type_options().len();
        self.type_index = Some(match (self.type_index, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    pub fn selected_type(&self) -> Option<ContractType> {
        self.type_index
            .and_then(|i| upload_type_options().into_iter().nth(i))
            .map(|(_, t)| t)
    }

    /// Contract name to show: the typed name or the file stem
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.trim().to_string();
        }
        Path::new(self.file_path.trim())
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        let path = self.file_path.trim();
        if path.is_empty() {
            return Err(MISSING_FILE.to_string());
        }
        let extension = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(format!(
                "Unsupported file type: only .pdf and .docx files are accepted (got '{}')",
                path
            ));
        }
        Ok(())
    }

    /// Validate and reset the form on success
    pub fn submit(&mut self) -> Result<&'static str, String> {
        self.validate()?;
        let contract_type = self.selected_type();
        tracing::info!(name = %self.display_name(), ?contract_type, "upload form submitted");
        *self = UploadForm::default();
        Ok(UPLOAD_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(path: &str) -> UploadForm {
        UploadForm {
            file_path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let mut form = form("   ");
        assert_eq!(form.submit(), Err(MISSING_FILE.to_string()));
    }

    #[test]
    fn test_extension_must_be_pdf_or_docx() {
        assert!(form("contract.pdf").validate().is_ok());
        assert!(form("Contract.DOCX").validate().is_ok());
        assert!(form("notes.txt").validate().is_err());
        assert!(form("no_extension").validate().is_err());
    }

    #[test]
    fn test_successful_submit_resets_form() {
        let mut form = UploadForm {
            file_path: "/tmp/msa.pdf".to_string(),
            name: "Master Services".to_string(),
            type_index: Some(1),
            focus: UploadField::Name,
        };
        assert_eq!(form.submit(), Ok(UPLOAD_SUCCESS));
        assert_eq!(form, UploadForm::default());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = UploadForm::default();
        form.input_char('a');
        form.focus = form.focus.next();
        form.input_char('b');
        form.backspace();
        form.input_char('c');
        assert_eq!(form.file_path, "a");
        assert_eq!(form.name, "c");
    }

    #[test]
    fn test_type_cycle_wraps() {
        let mut form = UploadForm::default();
        assert!(form.selected_type().is_none());
        form.cycle_type(false);
        assert_eq!(form.selected_type(), Some(ContractType::Other("Other".to_string())));
        form.cycle_type(true);
        assert_eq!(form.selected_type(), Some(ContractType::Nda));
    }

    #[test]
    fn test_display_name_falls_back_to_file_stem() {
        let form = form("/docs/Lease - Harbor.pdf");
        assert_eq!(form.display_name(), "Lease - Harbor");
    }
}
