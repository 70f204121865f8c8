//! Trainer CLI command construction

use crate::config::Config;

/// Build a trainer command from the current configuration
///
/// Returns `(full_command, display_command)`: the full command is what the
/// job runner executes, the display command is what the output dialog shows.
pub fn build_train_command(config: &Config) -> (String, String) {
    let trainer = if config.trainer_binary.is_empty() {
        "trader-train".to_string()
    } else {
        config.trainer_binary.clone()
    };

    let args = format!(
        "train --data-dir \"{}\" --risk-tolerance {} --max-position-size {} \
         --stop-loss {} --learning-rate {} --batch-size {} --epochs {}",
        config.data_dir,
        config.trading_params.risk_tolerance,
        config.trading_params.max_position_size,
        config.trading_params.stop_loss_percentage,
        config.ppo_settings.learning_rate,
        config.ppo_settings.batch_size,
        config.ppo_settings.epochs,
    );

    let full_command = format!("{} {}", trainer, args);
    let display_command = format!(
        "{} train --epochs {}",
        trainer, config.ppo_settings.epochs
    );

    (full_command, display_command)
}
