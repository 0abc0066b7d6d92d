//! Words command - Prints an amount in words.

use crate::cli::args::WordsArgs;
use crate::domain::amount_in_words;
use crate::errors::AppResult;

/// Execute the words command
pub fn execute(args: WordsArgs) -> AppResult<()> {
    let words = amount_in_words(args.amount)?;
    println!("{}", words);
    Ok(())
}
