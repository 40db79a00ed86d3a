//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main menu: show schema, check a document, normalize a document.

use crate::domain::{DomainError, RecordKind};
use crate::ports::InputPort;
use crate::usecases::RecordService;
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info};

/// Applies the prompt theme globally. Call once before the first prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::DarkYellow));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    ShowSchema,
    Check,
    Normalize,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 4] = [
        MenuAction::ShowSchema,
        MenuAction::Check,
        MenuAction::Normalize,
        MenuAction::Exit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::ShowSchema => "Show schema",
            MenuAction::Check => "Check document",
            MenuAction::Normalize => "Normalize document",
            MenuAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// A listed document. Selected as a whole so the path never round-trips
/// through its display string.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DocumentChoice(PathBuf);

impl fmt::Display for DocumentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

fn prompt_error(e: InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

/// Lists `*.json` files directly under `dir`, sorted. Missing dir yields none.
async fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, DomainError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(DomainError::Io(e.to_string())),
    };
    let mut out = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DomainError::Io(e.to_string()))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<RecordService>,
    data_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(service: Arc<RecordService>, data_dir: impl AsRef<Path>) -> Self {
        Self {
            service,
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    fn select_kind(&self) -> Result<RecordKind, DomainError> {
        Select::new("Record kind:", RecordKind::ALL.to_vec())
            .prompt()
            .map_err(prompt_error)
    }

    async fn select_document(&self) -> Result<PathBuf, DomainError> {
        let docs = list_documents(&self.data_dir).await?;
        if docs.is_empty() {
            let raw = Text::new("Path to JSON document:")
                .prompt()
                .map_err(prompt_error)?;
            return Ok(PathBuf::from(raw.trim()));
        }
        let choices: Vec<DocumentChoice> = docs.into_iter().map(DocumentChoice).collect();
        let picked = Select::new("Document:", choices)
            .prompt()
            .map_err(prompt_error)?;
        Ok(picked.0)
    }

    async fn handle(&self, action: MenuAction) -> Result<(), DomainError> {
        match action {
            MenuAction::ShowSchema => {
                let kind = self.select_kind()?;
                println!("{}", self.service.schema(kind)?);
            }
            MenuAction::Check => {
                let kind = self.select_kind()?;
                let path = self.select_document().await?;
                self.service.check_file(kind, &path).await?;
                println!("{} conforms to the {} wire schema", path.display(), kind);
            }
            MenuAction::Normalize => {
                let kind = self.select_kind()?;
                let path = self.select_document().await?;
                println!("{}", self.service.load(kind, &path).await?);
            }
            MenuAction::Exit => {}
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let action = match Select::new("What next?", MenuAction::ALL.to_vec()).prompt() {
                Ok(a) => a,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    MenuAction::Exit
                }
                Err(e) => return Err(prompt_error(e)),
            };
            if action == MenuAction::Exit {
                info!("exiting");
                return Ok(());
            }
            if let Err(e) = self.handle(action).await {
                error!(action = %action, "{}", e);
                println!("Error: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let docs = list_documents(dir.path()).await.unwrap();
        let names: Vec<String> = docs
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[tokio::test]
    async fn test_list_documents_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let docs = list_documents(&dir.path().join("nope")).await.unwrap();
        assert!(docs.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_document_choice_keeps_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.json");
        let path = dir.path().join(name);
        if std::fs::write(&path, "{}").is_err() {
            // Filesystem rejects non-UTF-8 names.
            return;
        }
        let docs = list_documents(dir.path()).await.unwrap();
        let choice = DocumentChoice(docs[0].clone());
        assert!(choice.to_string().ends_with(".json"));
        assert_eq!(choice.0, path);
        assert_ne!(PathBuf::from(choice.to_string()), path);
    }

    #[test]
    fn test_menu_labels() {
        let labels: Vec<String> = MenuAction::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec!["Show schema", "Check document", "Normalize document", "Exit"]
        );
    }
}
