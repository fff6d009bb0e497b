use rand::seq::SliceRandom;

/// Desktop Chrome signatures. Refresh when the stable channel moves far
/// enough that these read as stale.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 Edg/125.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
];

/// Viewports within common laptop and desktop panel sizes.
const VIEWPORTS: &[(u32, u32)] = &[
    (1920, 1080),
    (1680, 1050),
    (1536, 864),
    (1366, 768),
    (1280, 800),
];

/// Per-session browser fingerprint.
///
/// Each scrape session presents a distinct user agent and viewport; the
/// target site varies behavior (and rate limits) by client signature.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Draw a fingerprint for one session.
    #[must_use]
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();

        let user_agent = USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(USER_AGENTS[0])
            .to_string();
        let (viewport_width, viewport_height) =
            *VIEWPORTS.choose(&mut rng).unwrap_or(&VIEWPORTS[0]);

        Self {
            user_agent,
            viewport_width,
            viewport_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_draw_comes_from_the_pools() {
        let fp = FingerprintConfig::randomized();
        assert!(USER_AGENTS.contains(&fp.user_agent.as_str()));
        assert!(VIEWPORTS.contains(&(fp.viewport_width, fp.viewport_height)));
    }

    #[test]
    fn test_sessions_do_not_share_one_signature() {
        // Probabilistic, but 32 identical draws from 4x5 combinations
        // would mean the RNG is broken
        let draws: HashSet<_> = (0..32)
            .map(|_| {
                let fp = FingerprintConfig::randomized();
                (fp.user_agent, fp.viewport_width, fp.viewport_height)
            })
            .collect();
        assert!(draws.len() > 1, "every session drew the same fingerprint");
    }
}
