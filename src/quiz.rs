//! Round construction: breed inference from image URLs and choice selection.
//!
//! Both functions are pure. Randomness comes in through a caller-supplied
//! [`rand::Rng`] so rounds are reproducible under test with a seeded RNG.

use crate::error::QuizError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// One ephemeral quiz round. Replaced wholesale on refresh, never persisted.
#[derive(Debug, Clone)]
pub struct QuizRound {
    /// URL of the photo being shown.
    pub image_url: String,
    /// Canonical breed name derived from the URL.
    pub correct_breed: String,
    /// Shuffled answer options; contains `correct_breed` exactly once.
    pub choices: Vec<String>,
}

impl QuizRound {
    /// Builds a round from a fetched image URL: infer the breed, then draw
    /// wrong answers from the catalog.
    pub fn new<R: Rng>(
        image_url: String,
        catalog: &[String],
        choice_count: usize,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let correct_breed = breed_from_url(&image_url)?;
        let choices = multiple_choices(choice_count, &correct_breed, catalog, rng)?;
        Ok(Self {
            image_url,
            correct_breed,
            choices,
        })
    }

    pub fn is_correct(&self, choice_idx: usize) -> bool {
        self.choices
            .get(choice_idx)
            .is_some_and(|choice| *choice == self.correct_breed)
    }

    /// Index of the correct answer within `choices`.
    pub fn correct_idx(&self) -> Option<usize> {
        self.choices
            .iter()
            .position(|choice| *choice == self.correct_breed)
    }
}

/// Derives the breed name from an image URL such as
/// `https://images.dog.ceo/breeds/poodle-standard/n02113799_2280.jpg`.
///
/// The identifier segment after `/breeds/` is either `<base>` or
/// `<base>-<modifier>`; a two-part identifier comes back reversed and
/// space-joined ("standard poodle"). Anything else is a parse error rather
/// than a silent truncation.
pub fn breed_from_url(url: &str) -> Result<String, QuizError> {
    let (_, after) = url
        .split_once("/breeds/")
        .ok_or_else(|| QuizError::parse(url, "missing /breeds/ path segment"))?;

    // The identifier runs to the next '/' or to the end of the string.
    let identifier = after.split('/').next().unwrap_or("");
    if identifier.is_empty() {
        return Err(QuizError::parse(url, "empty breed identifier"));
    }

    let parts: Vec<&str> = identifier.split('-').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(QuizError::parse(url, "empty hyphen-separated part"));
    }

    match parts.as_slice() {
        [base] => Ok((*base).to_string()),
        [base, modifier] => Ok(format!("{} {}", modifier, base)),
        _ => Err(QuizError::parse(
            url,
            "more than two hyphen-separated parts",
        )),
    }
}

/// Draws `n` unique quiz options including `correct_answer`, shuffled.
///
/// Wrong answers are rejection-sampled uniformly from `catalog`. The distinct
/// candidate pool (catalog entries plus the correct answer) must be at least
/// `n`, otherwise the sampling loop could never terminate; that precondition
/// is checked up front and reported as `InvalidArgument`.
pub fn multiple_choices<R: Rng>(
    n: usize,
    correct_answer: &str,
    catalog: &[String],
    rng: &mut R,
) -> Result<Vec<String>, QuizError> {
    if n == 0 {
        return Err(QuizError::InvalidArgument(
            "choice count must be at least 1".to_string(),
        ));
    }

    let mut candidates: HashSet<&str> = catalog.iter().map(String::as_str).collect();
    candidates.insert(correct_answer);
    if n > candidates.len() {
        return Err(QuizError::InvalidArgument(format!(
            "requested {} choices but only {} distinct candidates are available",
            n,
            candidates.len()
        )));
    }

    let mut choices = vec![correct_answer.to_string()];
    while choices.len() < n {
        // Guarded above: there are enough distinct candidates for this to finish.
        if let Some(candidate) = catalog.choose(rng)
            && !choices.iter().any(|existing| existing == candidate)
        {
            choices.push(candidate.clone());
        }
    }
    choices.shuffle(rng);
    Ok(choices)
}
