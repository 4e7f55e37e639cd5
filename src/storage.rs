use crate::browser;
use anyhow::{anyhow, Context, Result};
use web_sys::Storage;

/// Where the best score survives between games
pub trait HighScoreStore {
    /// Stored best, 0 when nothing was saved yet
    fn load(&self) -> Result<i32>;
    fn save(&mut self, score: i32) -> Result<()>;
}

/// Backed by the browser's localStorage
pub struct LocalStorageHighScore {
    storage: Storage,
    key: String,
}

impl LocalStorageHighScore {
    pub fn open(key: &str) -> Result<Self> {
        Ok(LocalStorageHighScore {
            storage: browser::local_storage()?,
            key: key.to_string(),
        })
    }
}

impl HighScoreStore for LocalStorageHighScore {
    fn load(&self) -> Result<i32> {
        let stored = self
            .storage
            .get_item(&self.key)
            .map_err(|err| anyhow!("Error reading {} : {:#?}", self.key, err))?;
        match stored {
            Some(value) => value
                .trim()
                .parse::<i32>()
                .with_context(|| format!("{} holds {:?}, not a score", self.key, value)),
            None => Ok(0),
        }
    }

    fn save(&mut self, score: i32) -> Result<()> {
        self.storage
            .set_item(&self.key, &score.to_string())
            .map_err(|err| anyhow!("Error writing {} : {:#?}", self.key, err))
    }
}

/// Lives as long as the page, used when localStorage is unavailable
#[derive(Debug, Default)]
pub struct MemoryHighScore {
    best: Option<i32>,
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<i32> {
        Ok(self.best.unwrap_or(0))
    }

    fn save(&mut self, score: i32) -> Result<()> {
        self.best = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_starts_at_zero() {
        let mut store = MemoryHighScore::default();
        assert_eq!(store.load().unwrap(), 0);

        store.save(350).unwrap();
        assert_eq!(store.load().unwrap(), 350);
    }
}
