//! Keyboard device discovery via sysfs
//!
//! Every registered input device has a directory under `/sys/class/input`
//! with a `device/name` file. Devices whose name contains the keyboard
//! marker are candidates; the matching node lives under `/dev/input`.

use log::{debug, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default sysfs directory listing input devices
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/input";

/// Default directory holding device nodes
pub const DEFAULT_DEV_ROOT: &str = "/dev/input";

/// Default case-insensitive substring marking a keyboard-like device
pub const DEFAULT_NAME_MARKER: &str = "key";

/// Error locating a keyboard device
#[derive(Error, Debug)]
pub enum LocateError {
    /// No device name matched the marker
    #[error("no keyboard device found under {0}")]
    NotFound(PathBuf),

    /// Several devices matched and none was chosen
    #[error("no device selected among {0} candidates")]
    NoSelection(usize),

    /// The sysfs directory could not be listed
    #[error("failed to enumerate {path}: {source}")]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An input device candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Device node, e.g. `/dev/input/event3`
    pub path: PathBuf,
    /// Name reported by the kernel
    pub name: String,
}

impl Device {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// Picks one device when discovery finds several
///
/// Implemented outside the core, typically by prompting the user.
pub trait DeviceChooser {
    /// Return the index of the chosen device, or `None` to give up
    fn choose(&mut self, candidates: &[Device]) -> Option<usize>;
}

impl<F> DeviceChooser for F
where
    F: FnMut(&[Device]) -> Option<usize>,
{
    fn choose(&mut self, candidates: &[Device]) -> Option<usize> {
        self(candidates)
    }
}

/// Finds keyboard-like input devices
#[derive(Debug, Clone)]
pub struct DeviceLocator {
    sysfs_root: PathBuf,
    dev_root: PathBuf,
    name_marker: String,
}

impl Default for DeviceLocator {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT, DEFAULT_DEV_ROOT, DEFAULT_NAME_MARKER)
    }
}

impl DeviceLocator {
    pub fn new(
        sysfs_root: impl Into<PathBuf>,
        dev_root: impl Into<PathBuf>,
        name_marker: impl Into<String>,
    ) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            dev_root: dev_root.into(),
            name_marker: name_marker.into().to_lowercase(),
        }
    }

    /// List all devices whose name contains the marker, sorted by node name
    pub fn candidates(&self) -> Result<Vec<Device>, LocateError> {
        let entries = fs::read_dir(&self.sysfs_root).map_err(|source| LocateError::Enumeration {
            path: self.sysfs_root.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
            .collect();
        names.sort_by(|a, b| node_order(a).cmp(&node_order(b)));

        let devices: Vec<Device> = names
            .into_iter()
            .filter_map(|node| {
                // Entries without a readable name are not candidates
                let name = self.read_name(&node)?;
                if !name.to_lowercase().contains(&self.name_marker) {
                    return None;
                }
                Some(Device::new(self.dev_root.join(&node), name))
            })
            .collect();

        debug!(
            "Found {} candidate device(s) under {}",
            devices.len(),
            self.sysfs_root.display()
        );
        Ok(devices)
    }

    /// Resolve a single device, asking `chooser` only when several match
    pub fn locate(&self, chooser: &mut dyn DeviceChooser) -> Result<Device, LocateError> {
        let mut devices = self.candidates()?;

        match devices.len() {
            0 => Err(LocateError::NotFound(self.sysfs_root.clone())),
            1 => {
                let device = devices.remove(0);
                info!("Using device: {}", device);
                Ok(device)
            }
            count => {
                let index = chooser
                    .choose(&devices)
                    .filter(|&i| i < count)
                    .ok_or(LocateError::NoSelection(count))?;
                let device = devices.swap_remove(index);
                info!("Selected device: {}", device);
                Ok(device)
            }
        }
    }

    /// Describe an externally supplied device node, reading its name if sysfs has it
    pub fn device_for_path(&self, path: &Path) -> Device {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|node| self.read_name(node))
            .unwrap_or_else(|| "unknown device".to_string());
        Device::new(path, name)
    }

    fn read_name(&self, node: &str) -> Option<String> {
        let name_path = self.sysfs_root.join(node).join("device").join("name");
        let bytes = fs::read(name_path).ok()?;
        Some(String::from_utf8_lossy(&bytes).trim().to_string())
    }
}

/// Sort key putting `event2` before `event10`
fn node_order(node: &str) -> (&str, u64, &str) {
    let prefix = node.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = node[prefix.len()..].parse().unwrap_or(0);
    (prefix, number, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_sysfs(devices: &[(&str, Option<&str>)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (node, name) in devices {
            let device_dir = dir.path().join(node).join("device");
            fs::create_dir_all(&device_dir).unwrap();
            if let Some(name) = name {
                fs::write(device_dir.join("name"), format!("{}\n", name)).unwrap();
            }
        }
        dir
    }

    fn locator(dir: &TempDir) -> DeviceLocator {
        DeviceLocator::new(dir.path(), "/dev/input", DEFAULT_NAME_MARKER)
    }

    fn never_called(_: &[Device]) -> Option<usize> {
        panic!("chooser must not be consulted")
    }

    #[test]
    fn filters_by_marker_case_insensitively() {
        let dir = fake_sysfs(&[
            ("event0", Some("Power Button")),
            ("event1", Some("AT Translated Set 2 KEYBOARD")),
            ("event2", Some("Logitech USB Optical Mouse")),
            ("mice", None),
        ]);

        let devices = locator(&dir).candidates().unwrap();
        assert_eq!(
            devices,
            vec![Device::new("/dev/input/event1", "AT Translated Set 2 KEYBOARD")]
        );
    }

    #[test]
    fn single_candidate_is_returned_directly() {
        let dir = fake_sysfs(&[("event3", Some("Apple Keyboard")), ("event4", Some("Touchpad"))]);

        let device = locator(&dir).locate(&mut never_called).unwrap();
        assert_eq!(device.path, PathBuf::from("/dev/input/event3"));
        assert_eq!(device.name, "Apple Keyboard");
    }

    #[test]
    fn no_candidates_is_not_found() {
        let dir = fake_sysfs(&[("event0", Some("Power Button"))]);

        let err = locator(&dir).locate(&mut never_called).unwrap_err();
        assert!(matches!(err, LocateError::NotFound(_)));
    }

    #[test]
    fn multiple_candidates_go_to_chooser() {
        let dir = fake_sysfs(&[
            ("event5", Some("Keychron K2")),
            ("event2", Some("Internal Keyboard")),
        ]);

        let mut seen = Vec::new();
        let mut chooser = |candidates: &[Device]| -> Option<usize> {
            seen = candidates.to_vec();
            Some(1)
        };
        let device = locator(&dir).locate(&mut chooser).unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].path, PathBuf::from("/dev/input/event2"));
        assert_eq!(device.name, "Keychron K2");
    }

    #[test]
    fn candidates_are_in_numeric_node_order() {
        let dir = fake_sysfs(&[
            ("event10", Some("USB Keyboard")),
            ("event2", Some("Internal Keyboard")),
            ("event1", Some("Keypad")),
        ]);

        let nodes: Vec<PathBuf> = locator(&dir)
            .candidates()
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();
        assert_eq!(
            nodes,
            vec![
                PathBuf::from("/dev/input/event1"),
                PathBuf::from("/dev/input/event2"),
                PathBuf::from("/dev/input/event10"),
            ]
        );
    }

    #[test]
    fn non_utf8_name_is_kept() {
        let dir = fake_sysfs(&[("event4", None)]);
        let name_path = dir.path().join("event4").join("device").join("name");
        fs::write(&name_path, b"Keyboard \xff\xfe Edition\n").unwrap();

        let devices = locator(&dir).candidates().unwrap();
        assert_eq!(devices.len(), 1);
        assert!(devices[0].name.starts_with("Keyboard "));
        assert!(devices[0].name.contains('\u{FFFD}'));
    }

    #[test]
    fn declined_or_invalid_choice_is_an_error() {
        let dir = fake_sysfs(&[("event1", Some("Keyboard A")), ("event2", Some("Keyboard B"))]);
        let locator = locator(&dir);

        let err = locator.locate(&mut |_: &[Device]| -> Option<usize> { None }).unwrap_err();
        assert!(matches!(err, LocateError::NoSelection(2)));

        let err = locator.locate(&mut |_: &[Device]| -> Option<usize> { Some(9) }).unwrap_err();
        assert!(matches!(err, LocateError::NoSelection(2)));
    }

    #[test]
    fn missing_sysfs_root_is_enumeration_error() {
        let locator = DeviceLocator::new("/nonexistent/sys/class/input", "/dev/input", "key");
        let err = locator.candidates().unwrap_err();
        assert!(matches!(err, LocateError::Enumeration { .. }));
    }

    #[test]
    fn custom_marker() {
        let dir = fake_sysfs(&[("event1", Some("Generic KBD")), ("event2", Some("Keyboard"))]);
        let locator = DeviceLocator::new(dir.path(), "/dev/input", "KBD");

        let devices = locator.candidates().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "Generic KBD");
    }

    #[test]
    fn external_path_reads_name_when_available() {
        let dir = fake_sysfs(&[("event7", Some("Split Keyboard"))]);
        let locator = locator(&dir);

        let device = locator.device_for_path(Path::new("/dev/input/event7"));
        assert_eq!(device.name, "Split Keyboard");

        let device = locator.device_for_path(Path::new("/tmp/recording.bin"));
        assert_eq!(device.name, "unknown device");
        assert_eq!(device.path, PathBuf::from("/tmp/recording.bin"));
    }
}
