use clap::Parser;
use resumate::ClientConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "resumate",
    version,
    about = "Score a resume against a job description with an LLM"
)]
pub struct Cli {
    #[arg(long, short = 'j', help = "Job description (plain text file)")]
    pub job: PathBuf,
    #[arg(long, short = 'r', help = "Resume (.pdf or plain text file)")]
    pub resume: PathBuf,
    #[arg(long, help = "Backend: openai (api) or ollama (local)")]
    pub provider: Option<String>,
    #[arg(long, help = "Model id, e.g. gpt-4o-mini or llama3.1:8b")]
    pub model: Option<String>,
    #[arg(long, help = "Sampling temperature in [0, 1]")]
    pub temperature: Option<f32>,
    #[arg(long, help = "Maximum output tokens")]
    pub max_tokens: Option<u32>,
    #[arg(long, help = "Local server URL (defaults to OLLAMA_HOST or http://localhost:11434)")]
    pub host: Option<String>,
    #[arg(long, help = "Custom rubric JSON file")]
    pub rubric: Option<PathBuf>,
    #[arg(long, help = "Print the prompt sent to the model")]
    pub show_prompt: bool,
    #[arg(long, help = "Print the result as single-line JSON")]
    pub compact: bool,
}

impl Cli {
    /// Layer command-line flags over a base configuration.
    ///
    /// Picking a provider without `--model` switches to that provider's
    /// default model.
    pub fn apply(&self, base: ClientConfig) -> ClientConfig {
        let mut config = base;

        if let Some(provider) = &self.provider {
            let fresh = ClientConfig::new(provider.as_str());
            config.provider = fresh.provider;
            config.model = fresh.model;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_output_tokens = max_tokens;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_requires_job_and_resume() {
        assert!(Cli::try_parse_from(["resumate", "--job", "jd.txt"]).is_err());
        assert!(Cli::try_parse_from(["resumate", "-j", "jd.txt", "-r", "cv.pdf"]).is_ok());
    }

    #[test]
    fn test_flags_override_base() {
        let cli = Cli::try_parse_from([
            "resumate",
            "--job",
            "jd.txt",
            "--resume",
            "cv.txt",
            "--provider",
            "ollama",
            "--temperature",
            "0.5",
            "--max-tokens",
            "600",
            "--host",
            "http://gpu-box:11434",
        ])
        .unwrap();

        let config = cli.apply(ClientConfig::new("openai").with_model("gpt-4o"));
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3.1:8b");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_output_tokens, 600);
        assert_eq!(config.host, "http://gpu-box:11434");
    }

    #[test]
    fn test_base_kept_without_flags() {
        let cli = Cli::try_parse_from(["resumate", "-j", "jd.txt", "-r", "cv.txt"]).unwrap();
        let config = cli.apply(ClientConfig::new("openai").with_model("gpt-4o"));
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o");
        assert!(!cli.show_prompt);
        assert!(!cli.compact);
    }

    #[test]
    fn test_explicit_model_wins() {
        let cli = Cli::try_parse_from([
            "resumate", "-j", "jd.txt", "-r", "cv.txt", "--provider", "ollama", "--model",
            "qwen2.5:7b",
        ])
        .unwrap();
        assert_eq!(cli.apply(ClientConfig::default()).model, "qwen2.5:7b");
    }
}
