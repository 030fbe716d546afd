use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path to the pretrained captcha weights artifact.
    pub model_path: PathBuf,
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9292,
            model_path: PathBuf::from("models/runt.rten"),
            max_file_size: 5 * 1024 * 1024,
        }
    }
}
