//! Rebuilding full names from a flattened token list
//!
//! Corrupted lists store each person as `SURNAME` followed by one to three
//! given-name tokens: `["MENDES", "MURILO", "CABRAL", "JOÃO"]`. The
//! reconstruction walks the tokens once, left to right, grouping them back
//! into `"MENDES, Murilo"` and `"CABRAL, João"`.
//!
//! This is a best-effort repair. Ambiguous input (more than three given
//! names, compound surnames outside the particle set) can be grouped wrongly
//! and should be reviewed by a curator.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::formatter::{is_all_uppercase, title_case};

/// Default cap on given-name tokens collected per person
pub const DEFAULT_MAX_GIVEN_NAMES: usize = 3;

lazy_static! {
    /// Portuguese surname particles absorbed into the given names
    static ref DEFAULT_PARTICLES: Vec<String> = ["DE", "DA", "DO", "DOS", "DAS"]
        .iter()
        .map(|p| p.to_string())
        .collect();
}

/// Tuning for [`reconstruct_with`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructOptions {
    /// Maximum given-name tokens per person
    pub max_given_names: usize,
    /// Uppercase tokens that never start a new surname
    pub particles: Vec<String>,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            max_given_names: DEFAULT_MAX_GIVEN_NAMES,
            particles: DEFAULT_PARTICLES.clone(),
        }
    }
}

impl ReconstructOptions {
    fn is_particle(&self, token: &str) -> bool {
        let upper = token.to_uppercase();
        self.particles.iter().any(|p| p.to_uppercase() == upper)
    }

    /// An uppercase token once given names have started marks the next surname.
    fn starts_new_name(&self, token: &str) -> bool {
        is_all_uppercase(token) && !token.contains(' ') && !self.is_particle(token)
    }
}

/// Regroup a flattened token list with the default options.
///
/// # Examples
/// ```
/// use im_authors::reconstruct;
/// assert_eq!(
///     reconstruct(&["MENDES", "MURILO", "CABRAL", "JOÃO"]),
///     vec!["MENDES, Murilo", "CABRAL, João"]
/// );
/// ```
pub fn reconstruct<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    reconstruct_with(tokens, &ReconstructOptions::default())
}

/// Regroup a flattened token list.
///
/// Each person starts with a surname token (uppercased) followed by up to
/// `max_given_names` tokens. After the first given name, an all-uppercase
/// token that is not a particle closes the group. Given names that are all
/// uppercase are title-cased. Blank tokens are skipped; every other token
/// ends up in exactly one output name, in input order.
pub fn reconstruct_with<S: AsRef<str>>(tokens: &[S], options: &ReconstructOptions) -> Vec<String> {
    let tokens: Vec<&str> = tokens
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();

    let mut names = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let surname = tokens[i].to_uppercase();
        i += 1;

        let mut given: Vec<&str> = Vec::new();
        while i < tokens.len() && given.len() < options.max_given_names {
            let token = tokens[i];
            if !given.is_empty() && options.starts_new_name(token) {
                break;
            }
            given.push(token);
            i += 1;
        }

        if given.is_empty() {
            names.push(surname);
            continue;
        }

        let mut given = given.join(" ");
        if is_all_uppercase(&given) {
            given = title_case(&given);
        }
        names.push(format!("{}, {}", surname, given));
    }

    names
}
