//! `memoria prompts` — List the suggested prompts.

use memoria_config::AppConfig;

pub fn run(config: &AppConfig) {
    for (i, prompt) in config.assistant.suggested_prompts.iter().enumerate() {
        println!("  {}. {prompt}", i + 1);
    }
}
