//! TOML configuration deserialisation for benchmark jobs.

use serde::Deserialize;

use crate::functions;

/// Top-level job configuration.
///
/// Every section is optional; an empty file reproduces the reference
/// benchmark (sin on [0, π], 1001 nodes, 1001 subintervals, 1 trial).
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub function: FunctionConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which built-in sample function to benchmark.
#[derive(Debug, Deserialize)]
pub struct FunctionConfig {
    /// Built-in function name (see `batten-cli functions`). Default: "sin".
    #[serde(default = "default_function")]
    pub name: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            name: default_function(),
        }
    }
}

fn default_function() -> String {
    "sin".into()
}

/// Sampling grid configuration.
#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Number of nodes (default: 1001).
    #[serde(default = "default_nodes")]
    pub nodes: usize,
    /// Sampling domain [a, b] (default: [0, π]).
    #[serde(default = "default_domain")]
    pub domain: [f64; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            domain: default_domain(),
        }
    }
}

fn default_nodes() -> usize {
    1001
}

fn default_domain() -> [f64; 2] {
    [0.0, std::f64::consts::PI]
}

/// Quadrature configuration.
#[derive(Debug, Deserialize)]
pub struct IntegrationConfig {
    /// Number of equal-width quadrature cells (default: 1001).
    #[serde(default = "default_subintervals")]
    pub subintervals: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            subintervals: default_subintervals(),
        }
    }
}

fn default_subintervals() -> usize {
    1001
}

/// Benchmark harness configuration.
#[derive(Debug, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of independent timed trials (default: 1).
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Compute backend: "auto", "cpu", or "serial". Default: "auto".
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            backend: default_backend(),
        }
    }
}

fn default_trials() -> usize {
    1
}

fn default_backend() -> String {
    "auto".into()
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save trial results as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also save trial results as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        if functions::lookup(&self.function.name).is_none() {
            anyhow::bail!(
                "Unknown function '{}'. Run `batten-cli functions` for the available names",
                self.function.name
            );
        }
        if self.grid.nodes < 3 {
            anyhow::bail!("grid.nodes must be at least 3, got {}", self.grid.nodes);
        }
        if self.grid.domain[0] >= self.grid.domain[1] {
            anyhow::bail!(
                "grid.domain must satisfy a < b, got [{}, {}]",
                self.grid.domain[0],
                self.grid.domain[1]
            );
        }
        if self.integration.subintervals < 1 {
            anyhow::bail!("integration.subintervals must be at least 1");
        }
        if self.benchmark.trials < 1 {
            anyhow::bail!("benchmark.trials must be at least 1");
        }
        match self.benchmark.backend.as_str() {
            "auto" | "cpu" | "serial" => {}
            other => anyhow::bail!(
                "Unknown backend '{}'. Valid values: auto, cpu, serial",
                other
            ),
        }
        Ok(())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
