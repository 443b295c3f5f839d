//! Exporting generated content
//!
//! Both exports refuse to run without real content, then hand their result
//! to a [`ShareSurface`]: the text itself, or a rendered PDF file.

pub mod desktop;
pub mod mock;
pub mod pdf;

pub use desktop::DesktopShareSurface;
pub use mock::MockShareSurface;
pub use pdf::{PdfExporter, PdfMetadata};

use crate::state::has_content;
use crate::{Error, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareItem {
    Text(String),
    File(PathBuf),
}

/// The platform facility that hands items to other applications.
pub trait ShareSurface {
    fn present(&self, items: &[ShareItem]) -> Result<()>;
}

/// Reject empty content and the placeholder sentinel.
pub fn ensure_content(content: &str) -> Result<&str> {
    if has_content(content) {
        Ok(content)
    } else {
        Err(Error::NoContent)
    }
}

/// Share the content as a single plain-text item.
pub fn share_text(content: &str, surface: &dyn ShareSurface) -> Result<()> {
    let content = ensure_content(content)?;
    surface.present(&[ShareItem::Text(content.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PLACEHOLDER;

    #[test]
    fn test_share_text_presents_single_item() {
        let surface = MockShareSurface::new();
        share_text("Vertical farms.", &surface).unwrap();
        assert_eq!(
            surface.get_presented(),
            vec![vec![ShareItem::Text("Vertical farms.".to_string())]]
        );
    }

    #[test]
    fn test_share_text_refuses_absent_content() {
        let surface = MockShareSurface::new();
        for content in ["", PLACEHOLDER] {
            let err = share_text(content, &surface).unwrap_err();
            assert!(matches!(err, Error::NoContent));
        }
        assert_eq!(surface.get_present_count(), 0);
    }

    #[test]
    fn test_share_text_reports_missing_context() {
        let surface = MockShareSurface::new().without_context();
        let err = share_text("idea", &surface).unwrap_err();
        assert!(matches!(err, Error::NoPresentationContext(_)));
    }
}
