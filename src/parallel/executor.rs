//! Parallel tokenizer for independent source buffers
//!
//! Uses Rayon for work-stealing parallelism with configurable limits. Every
//! buffer gets its own [`Scanner`], so no state is shared between workers.

use crate::error::{Error, LexError, Result};
use crate::lexer::{ScanConfig, Scanner, Token};
use rayon::prelude::*;

/// Configuration for parallel tokenizing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (default: num_cpus)
    pub max_parallelism: usize,
    /// Fail on the first faulty buffer vs return every per-buffer result
    pub fail_fast: bool,
    /// Limits applied to each buffer
    pub scan: ScanConfig,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_parallelism: num_cpus::get(),
            fail_fast: false,
            scan: ScanConfig::default(),
        }
    }
}

/// Tokenize many sources concurrently
///
/// # Arguments
/// * `sources` - Independent source buffers
/// * `config` - Parallelism and per-buffer scan limits
///
/// # Returns
/// * `Ok(results)` - One result per source, in input order
/// * `Err(Error::Lex)` - First faulty buffer in input order (if fail_fast=true)
/// * `Err(Error::ThreadPool)` - Worker pool could not be built
pub fn tokenize_many<S>(
    sources: &[S],
    config: &ParallelConfig,
) -> Result<Vec<std::result::Result<Vec<Token>, LexError>>>
where
    S: AsRef<str> + Sync,
{
    let scan = config.scan;
    let tokenize_one =
        |source: &S| Scanner::new(source.as_ref()).with_config(scan).scan_tokens();

    // Empty input fast path
    if sources.is_empty() {
        return Ok(Vec::new());
    }

    // Single source - no parallelism needed
    if sources.len() == 1 {
        let result = tokenize_one(&sources[0]);
        return finish(vec![result], config.fail_fast);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_parallelism.clamp(1, sources.len()))
        .build()
        .map_err(|e| Error::ThreadPool(format!("Failed to create thread pool: {}", e)))?;

    tracing::debug!(
        sources = sources.len(),
        threads = pool.current_num_threads(),
        "tokenizing in parallel"
    );

    let results: Vec<_> = pool.install(|| sources.par_iter().map(tokenize_one).collect());
    finish(results, config.fail_fast)
}

fn finish(
    results: Vec<std::result::Result<Vec<Token>, LexError>>,
    fail_fast: bool,
) -> Result<Vec<std::result::Result<Vec<Token>, LexError>>> {
    if fail_fast {
        if let Some(Err(err)) = results.iter().find(|result| result.is_err()) {
            return Err(Error::Lex(err.clone()));
        }
    }
    Ok(results)
}
