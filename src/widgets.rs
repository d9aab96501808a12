mod dial;
mod prompt;
mod spinner;

pub use dial::Dial;
pub use prompt::Prompt;
pub use spinner::Spinner;
