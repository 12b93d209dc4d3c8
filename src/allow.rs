//! Domain allow-list matching.
//!
//! Each credential carries a list of glob patterns naming the domains it may update. Patterns
//! are matched against the literal domain string from the request: no case folding, no
//! trailing-dot normalization, and no implicit subdomain wildcarding.
//!
//! | Pattern             | Matches                                   |
//! |---------------------|-------------------------------------------|
//! | `home.example.com`  | exactly `home.example.com`                |
//! | `*.example.com`     | `a.example.com`, `a.b.example.com`        |
//! | `home.*`            | `home.example.com`, `home.example.org`    |
//! | `host?.example.com` | `host1.example.com`, but not `host10...`  |
//!
//! `*` matches any run of characters, including an empty run and including `.`. `?` matches
//! exactly one character. Every other character matches itself.

/// Returns true if `domain` matches at least one of `patterns`.
#[must_use]
pub fn matches<S: AsRef<str>>(patterns: &[S], domain: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| glob_match(pattern.as_ref(), domain))
}

/// Returns true if the whole of `candidate` matches the glob `pattern`.
#[must_use]
pub fn glob_match(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();

    let (mut p, mut c) = (0, 0);
    // Position of the last `*` seen, and the candidate position it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while c < candidate.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, c));
                p += 1;
            }
            Some('?') => {
                p += 1;
                c += 1;
            }
            Some(&ch) if ch == candidate[c] => {
                p += 1;
                c += 1;
            }
            _ => match backtrack {
                // Let the last star swallow one more character and retry.
                Some((star_p, star_c)) => {
                    backtrack = Some((star_p, star_c + 1));
                    p = star_p + 1;
                    c = star_c + 1;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&ch| ch == '*')
}
