use anyhow::Context;
use rand::Rng;
use std::path::Path;

/// Built-in praise pool used when no phrase file is given.
pub const DEFAULT_PHRASES: &[&str] = &[
    "Well done!",
    "Excellent work!",
    "Brilliant answer!",
    "Keep it up!",
    "You are getting better every day!",
    "I am proud of you!",
    "Much better than I expected!",
    "You did great today!",
    "That was a pleasure to read!",
    "Remarkable progress!",
];

/// One phrase per line, UTF-8, blank lines skipped.
pub fn load(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading phrase file {}", path.display()))?;
    let phrases: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    anyhow::ensure!(
        !phrases.is_empty(),
        "phrase file {} contains no phrases",
        path.display()
    );
    Ok(phrases)
}

pub fn pick<'a>(rng: &mut impl Rng, phrases: &'a [String]) -> &'a str {
    &phrases[rng.random_range(0..phrases.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_is_deterministic_for_a_seed() {
        let phrases: Vec<String> = DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect();
        let a = pick(&mut StdRng::seed_from_u64(7), &phrases).to_string();
        let b = pick(&mut StdRng::seed_from_u64(7), &phrases).to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn pick_stays_inside_the_pool() {
        let phrases: Vec<String> = DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let p = pick(&mut rng, &phrases);
            assert!(DEFAULT_PHRASES.contains(&p));
        }
    }

    #[test]
    fn load_skips_blank_lines() {
        let dir = std::env::temp_dir().join(format!("diaryfix-phrases-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let file = dir.join("pool.txt");
        std::fs::write(&file, "Good job!\n\n  Nice!  \n").expect("write pool");
        let phrases = load(&file).expect("load pool");
        assert_eq!(phrases, vec!["Good job!".to_string(), "Nice!".to_string()]);
    }

    #[test]
    fn load_rejects_empty_pool() {
        let dir = std::env::temp_dir().join(format!("diaryfix-phrases-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let file = dir.join("empty.txt");
        std::fs::write(&file, "\n \n").expect("write pool");
        assert!(load(&file).is_err());
    }
}
