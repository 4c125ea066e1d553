//! Hard bounds on rendered responses.
//!
//! Every response must pass these checks regardless of how it was
//! produced. A violation is a defect in a template or in the
//! paraphrasing backend, never something to show a user.

use thiserror::Error;

pub const MAX_SENTENCES: usize = 3;
pub const MAX_WORDS: usize = 150;
pub const MAX_BULLETS: usize = 5;

/// Shape the bounds are applied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Prose,
    List,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatViolation {
    #[error("response has {found} sentences, limit is {max}")]
    TooManySentences { found: usize, max: usize },
    #[error("response has {found} words, limit is {max}")]
    TooManyWords { found: usize, max: usize },
    #[error("response has {found} bullets, limit is {max}")]
    TooManyBullets { found: usize, max: usize },
}

/// Checks a rendered response against the bounds for its shape.
///
/// Prose: at most [`MAX_SENTENCES`] sentences and [`MAX_WORDS`] words.
/// Lists: at most [`MAX_BULLETS`] bullet lines, with the prose bounds
/// applied to the non-bullet lines only.
pub fn validate(text: &str, shape: ResponseShape) -> Result<(), FormatViolation> {
    match shape {
        ResponseShape::Prose => {
            check_prose(text)?;
        }
        ResponseShape::List => {
            let bullets = text.lines().filter(|l| is_bullet(l)).count();
            if bullets > MAX_BULLETS {
                return Err(FormatViolation::TooManyBullets {
                    found: bullets,
                    max: MAX_BULLETS,
                });
            }
            let prose: Vec<&str> = text.lines().filter(|l| !is_bullet(l)).collect();
            check_prose(&prose.join("\n"))?;
        }
    }
    Ok(())
}

fn is_bullet(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("- ") || trimmed.starts_with("\u{2022} ")
}

fn check_prose(text: &str) -> Result<(), FormatViolation> {
    let sentences = count_sentences(text);
    if sentences > MAX_SENTENCES {
        return Err(FormatViolation::TooManySentences {
            found: sentences,
            max: MAX_SENTENCES,
        });
    }
    let words = text.split_whitespace().count();
    if words > MAX_WORDS {
        return Err(FormatViolation::TooManyWords {
            found: words,
            max: MAX_WORDS,
        });
    }
    Ok(())
}

/// Counts sentence terminators, treating a run of them as one.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !in_run {
                count += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    count
}
