use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directory-layout and transfer settings. Every field has a default matching
/// the layout the tool was deployed with, so a missing config file is valid.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default = "default_iso_share", rename = "isoShare")]
    pub iso_share: String,
    #[serde(default = "default_backup_share", rename = "backupShare")]
    pub backup_share: String,
    #[serde(default = "default_iso_mount", rename = "isoMount")]
    pub iso_mount: PathBuf,
    #[serde(default = "default_backup_mount", rename = "backupMount")]
    pub backup_mount: PathBuf,
    #[serde(default = "default_unpack_root", rename = "unpackRoot")]
    pub unpack_root: PathBuf,
    #[serde(default = "default_media_mount_root", rename = "mediaMountRoot")]
    pub media_mount_root: PathBuf,
    #[serde(default = "default_inventory_base", rename = "inventoryBase")]
    pub inventory_base: String,
    #[serde(default = "default_log_file", rename = "logFile")]
    pub log_file: PathBuf,
    #[serde(default = "default_bw_limit_kb", rename = "bwLimitKb")]
    pub bw_limit_kb: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            iso_share: default_iso_share(),
            backup_share: default_backup_share(),
            iso_mount: default_iso_mount(),
            backup_mount: default_backup_mount(),
            unpack_root: default_unpack_root(),
            media_mount_root: default_media_mount_root(),
            inventory_base: default_inventory_base(),
            log_file: default_log_file(),
            bw_limit_kb: default_bw_limit_kb(),
        }
    }
}

impl Settings {
    /// Resolves the inventory file name for an optional version selector:
    /// `<base>.csv` by default, `<base>.<version>.csv` when selected.
    pub fn inventory_file(&self, version: Option<&str>) -> PathBuf {
        match version {
            Some(v) => PathBuf::from(format!("{}.{}.csv", self.inventory_base, v)),
            None => PathBuf::from(format!("{}.csv", self.inventory_base)),
        }
    }
}

fn default_iso_share() -> String {
    "//sp-dk-smb.seaproject.ru/project_iso".to_string()
}

fn default_backup_share() -> String {
    "//sp-dk-smb.seaproject.ru/project_backup".to_string()
}

fn default_iso_mount() -> PathBuf {
    PathBuf::from("/mnt/iso")
}

fn default_backup_mount() -> PathBuf {
    PathBuf::from("/mnt/backup")
}

fn default_unpack_root() -> PathBuf {
    PathBuf::from("/mnt/share")
}

fn default_media_mount_root() -> PathBuf {
    PathBuf::from("/media")
}

fn default_inventory_base() -> String {
    "inventory.numbers".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("distrstage.log")
}

fn default_bw_limit_kb() -> u32 {
    102_400
}
