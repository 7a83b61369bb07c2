use crate::utils::error::Result;

/// Flat-file access used by the persistence adapter. Paths are relative to
/// whatever root the implementation is bound to.
pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn cultures_file(&self) -> &str;
    fn inputs_file(&self) -> &str;
    fn abort_token(&self) -> &str;
    fn confirm_token(&self) -> &str;
}

/// The front-end seen by the session: one question in, one answer out.
pub trait Console {
    /// Shows `prompt` and blocks for one line of answer, without the line
    /// terminator. Returns `FarmError::InputClosed` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    fn show(&mut self, text: &str);
}
