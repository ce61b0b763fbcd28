use std::{fs, path::Path};

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::core::CommandError;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Reads a whole text file named on the command line.
pub fn read_input_file(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|err| {
        CommandError::InvalidArguments(format!("cannot read `{}`: {}", path.display(), err))
    })
}
