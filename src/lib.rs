//! Read, create, update, upload and delete single files on one branch of a
//! remote repository through its file-content API.
pub mod contents;
pub mod error;

pub use contents::{
    client::{BranchHandle, ContentsClient},
    config::ClientConfig,
    request::FileOperation,
    transport::{HttpResponse, ReqwestTransport, Transport},
    types::{RemoteFile, WriteReceipt},
};
pub use error::{ContentsError, Result};
