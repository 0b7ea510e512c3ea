//! Manual journal backup use case

use crate::infrastructure::{BackupManager, BackupOutcome, BackupTarget, Settings};
use chrono::NaiveDateTime;

/// Snapshot the whole journal. Without `force` the frequency gate and the
/// `auto_backup` switch apply.
pub fn backup_journal(settings: &Settings, force: bool, now: NaiveDateTime) -> BackupOutcome {
    let manager = BackupManager::from_settings(settings);

    if force {
        manager.backup(&BackupTarget::Journal, now)
    } else {
        manager.maybe_backup(&BackupTarget::Journal, now)
    }
}
