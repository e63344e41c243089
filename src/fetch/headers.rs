/// Desktop browser user agents sent in rotation.
pub const DEFAULT_USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.1 Safari/605.1.15",
];

/// Round-robin over a fixed set of `User-Agent` values.
#[derive(Debug, Clone)]
pub struct HeaderRotator {
    agents: Vec<String>,
    cursor: usize,
}

impl HeaderRotator {
    /// Rotate over `agents`; an empty list falls back to [`DEFAULT_USER_AGENTS`].
    pub fn new(agents: Vec<String>) -> Self {
        let agents = if agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|a| a.to_string()).collect()
        } else {
            agents
        };
        Self { agents, cursor: 0 }
    }

    /// The next user agent. Wraps around forever.
    pub fn next_agent(&mut self) -> &str {
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.agents.len();
        &self.agents[idx]
    }
}

impl Default for HeaderRotator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
