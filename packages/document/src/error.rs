use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Duplicate node id {id} in page {page_id}")]
    DuplicateId { page_id: String, id: String },

    #[error("Leaf node {id} ({kind}) carries children")]
    ChildrenOnLeaf { id: String, kind: String },

    #[error("Duplicate page id {0}")]
    DuplicatePage(String),

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid page JSON: {0}")]
    Json(String),
}

impl DocumentError {
    pub fn duplicate_id(page_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            page_id: page_id.into(),
            id: id.into(),
        }
    }

    pub fn children_on_leaf(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::ChildrenOnLeaf {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e.to_string())
    }
}
