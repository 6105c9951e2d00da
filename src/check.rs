use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quiz_grader::load_and_validate;

pub fn check(quiz_path: PathBuf, json: bool) -> Result<()> {
    let text = fs::read_to_string(&quiz_path)
        .with_context(|| format!("failed to read {}", quiz_path.display()))?;

    let document = load_and_validate(&text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("{}", document.title);
        println!("{} questions", document.questions.len());
    }

    Ok(())
}
