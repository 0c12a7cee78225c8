//! String comparison command

use anyhow::Result;
use essay_core::error::exit_codes;
use essay_matching::{are_similar, jaro_winkler, levenshtein};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Comparison<'a> {
    a: &'a str,
    b: &'a str,
    levenshtein: usize,
    damerau_levenshtein: usize,
    jaro_winkler: f64,
    similar: bool,
}

impl<'a> Comparison<'a> {
    fn new(a: &'a str, b: &'a str) -> Self {
        Self {
            a,
            b,
            levenshtein: levenshtein(a, b, false),
            damerau_levenshtein: levenshtein(a, b, true),
            jaro_winkler: jaro_winkler(a, b, true, false),
            similar: are_similar(a, b),
        }
    }
}

/// Print how close two strings are
pub fn run(a: &str, b: &str, json: bool) -> Result<i32> {
    let comparison = Comparison::new(a, b);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(exit_codes::SUCCESS);
    }

    println!("Levenshtein:          {}", comparison.levenshtein);
    println!("Damerau-Levenshtein:  {}", comparison.damerau_levenshtein);
    println!("Jaro-Winkler:         {:.4}", comparison.jaro_winkler);
    let verdict = if comparison.similar {
        "similar".green().to_string()
    } else {
        "different".red().to_string()
    };
    println!("Verdict:              {}", verdict);

    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_counts_swaps() {
        let comparison = Comparison::new("house", "hosue");
        assert_eq!(comparison.levenshtein, 2);
        assert_eq!(comparison.damerau_levenshtein, 1);
        assert!(comparison.similar);
    }
}
