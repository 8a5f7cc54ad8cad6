use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::interfaces::adapters::EngineResolver;
use crate::core::models::{AppSettings, EngineSource, OcrEngineHandle};
use crate::global_constants::{
    BUNDLED_ENGINE_DIR_NAME, ENGINE_EXECUTABLE_NAME, ENGINE_PATH_ENV_VAR, LOG_TAG_ENGINE_LOCATOR,
    SYSTEM_ENGINE_DIRS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCandidate {
    pub path: PathBuf,
    pub source: EngineSource,
}

/// Probes a fixed, ordered list of candidate paths.
pub struct CandidateListResolver {
    candidates: Vec<EngineCandidate>,
    executable_name: String,
}

impl CandidateListResolver {
    pub fn new(candidates: Vec<EngineCandidate>) -> Self {
        Self {
            candidates,
            executable_name: ENGINE_EXECUTABLE_NAME.to_string(),
        }
    }

    pub fn configured(path: Option<PathBuf>) -> Self {
        Self::new(
            path.into_iter()
                .map(|path| EngineCandidate {
                    path,
                    source: EngineSource::Configured,
                })
                .collect(),
        )
    }

    pub fn environment(value: Option<OsString>) -> Self {
        Self::new(
            value
                .filter(|value| !value.is_empty())
                .map(|value| EngineCandidate {
                    path: PathBuf::from(value),
                    source: EngineSource::Environment,
                })
                .into_iter()
                .collect(),
        )
    }

    /// `<app dir>/Tesseract-OCR/<exe>`, then `<app dir>/<exe>`.
    pub fn bundled(app_dir: &Path) -> Self {
        Self::new(vec![
            EngineCandidate {
                path: app_dir.join(BUNDLED_ENGINE_DIR_NAME).join(ENGINE_EXECUTABLE_NAME),
                source: EngineSource::Bundled,
            },
            EngineCandidate {
                path: app_dir.join(ENGINE_EXECUTABLE_NAME),
                source: EngineSource::Bundled,
            },
        ])
    }

    /// Every `PATH` entry, then the platform's usual install directories.
    pub fn system(path_var: Option<OsString>, default_dirs: &[PathBuf]) -> Self {
        let search_path_candidates = path_var
            .iter()
            .flat_map(|value| std::env::split_paths(value).collect::<Vec<_>>())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| EngineCandidate {
                path: dir.join(ENGINE_EXECUTABLE_NAME),
                source: EngineSource::SearchPath,
            });

        let default_candidates = default_dirs.iter().map(|dir| EngineCandidate {
            path: dir.join(ENGINE_EXECUTABLE_NAME),
            source: EngineSource::SystemDefault,
        });

        let mut candidates: Vec<EngineCandidate> = Vec::new();
        for candidate in search_path_candidates.chain(default_candidates) {
            if !candidates.iter().any(|existing| existing.path == candidate.path) {
                candidates.push(candidate);
            }
        }

        Self::new(candidates)
    }

    #[allow(dead_code)]
    pub fn candidates(&self) -> &[EngineCandidate] {
        &self.candidates
    }

    fn qualifies(&self, path: &Path) -> bool {
        let has_expected_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(&self.executable_name));
        if !has_expected_name {
            return false;
        }

        match std::fs::metadata(path) {
            Ok(metadata) => metadata.is_file() && is_executable(&metadata),
            Err(_) => false,
        }
    }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

impl EngineResolver for CandidateListResolver {
    fn resolve(&self) -> Option<OcrEngineHandle> {
        self.candidates.iter().find_map(|candidate| {
            log::debug!(
                "{} checking {} candidate {:?}",
                LOG_TAG_ENGINE_LOCATOR,
                candidate.source,
                candidate.path
            );
            self.qualifies(&candidate.path)
                .then(|| OcrEngineHandle::new(candidate.path.clone(), candidate.source))
        })
    }

    fn searched_locations(&self) -> Vec<PathBuf> {
        self.candidates.iter().map(|c| c.path.clone()).collect()
    }
}

/// Tries each policy in order and takes the first engine found.
pub struct ChainedEngineResolver {
    policies: Vec<Box<dyn EngineResolver>>,
}

impl ChainedEngineResolver {
    pub fn new(policies: Vec<Box<dyn EngineResolver>>) -> Self {
        Self { policies }
    }

    /// Configured path, environment override, bundled copy, then system
    /// install.
    pub fn from_environment(settings: &AppSettings) -> Self {
        let app_dir = application_dir();
        log::info!("{} application base path: {:?}", LOG_TAG_ENGINE_LOCATOR, app_dir);

        let default_dirs: Vec<PathBuf> = SYSTEM_ENGINE_DIRS.iter().map(PathBuf::from).collect();

        Self::new(vec![
            Box::new(CandidateListResolver::configured(settings.engine_path.clone())),
            Box::new(CandidateListResolver::environment(std::env::var_os(
                ENGINE_PATH_ENV_VAR,
            ))),
            Box::new(CandidateListResolver::bundled(&app_dir)),
            Box::new(CandidateListResolver::system(
                std::env::var_os("PATH"),
                &default_dirs,
            )),
        ])
    }
}

impl EngineResolver for ChainedEngineResolver {
    fn resolve(&self) -> Option<OcrEngineHandle> {
        self.policies.iter().find_map(|policy| policy.resolve())
    }

    fn searched_locations(&self) -> Vec<PathBuf> {
        self.policies
            .iter()
            .flat_map(|policy| policy.searched_locations())
            .collect()
    }
}

fn application_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install_fake_engine(dir: &Path) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(ENGINE_EXECUTABLE_NAME);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    struct Layout {
        _root: TempDir,
        app_dir: PathBuf,
        system_dir: PathBuf,
    }

    fn layout() -> Layout {
        let root = tempfile::tempdir().unwrap();
        let app_dir = root.path().join("app");
        let system_dir = root.path().join("system").join("bin");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::create_dir_all(&system_dir).unwrap();
        Layout {
            _root: root,
            app_dir,
            system_dir,
        }
    }

    fn chain_for(layout: &Layout) -> ChainedEngineResolver {
        ChainedEngineResolver::new(vec![
            Box::new(CandidateListResolver::bundled(&layout.app_dir)),
            Box::new(CandidateListResolver::system(
                None,
                std::slice::from_ref(&layout.system_dir),
            )),
        ])
    }

    #[test]
    fn test_only_bundled_engine_is_chosen() {
        let layout = layout();
        let bundled = install_fake_engine(&layout.app_dir.join(BUNDLED_ENGINE_DIR_NAME));

        let handle = chain_for(&layout).resolve().unwrap();

        assert_eq!(handle.executable(), bundled.as_path());
        assert_eq!(handle.source(), EngineSource::Bundled);
    }

    #[test]
    fn test_only_system_engine_is_chosen() {
        let layout = layout();
        let system = install_fake_engine(&layout.system_dir);

        let handle = chain_for(&layout).resolve().unwrap();

        assert_eq!(handle.executable(), system.as_path());
        assert_eq!(handle.source(), EngineSource::SystemDefault);
    }

    #[test]
    fn test_no_engine_resolves_to_none_and_lists_locations() {
        let layout = layout();
        let chain = chain_for(&layout);

        assert!(chain.resolve().is_none());
        assert_eq!(chain.searched_locations().len(), 3);
    }

    #[test]
    fn test_bundled_engine_takes_priority_over_system() {
        let layout = layout();
        let bundled = install_fake_engine(&layout.app_dir.join(BUNDLED_ENGINE_DIR_NAME));
        install_fake_engine(&layout.system_dir);

        let handle = chain_for(&layout).resolve().unwrap();

        assert_eq!(handle.executable(), bundled.as_path());
    }

    #[test]
    fn test_engine_next_to_executable_counts_as_bundled() {
        let layout = layout();
        let beside = install_fake_engine(&layout.app_dir);

        let handle = chain_for(&layout).resolve().unwrap();

        assert_eq!(handle.executable(), beside.as_path());
        assert_eq!(handle.source(), EngineSource::Bundled);
    }

    #[test]
    fn test_directory_with_engine_name_does_not_qualify() {
        let layout = layout();
        std::fs::create_dir_all(
            layout
                .app_dir
                .join(BUNDLED_ENGINE_DIR_NAME)
                .join(ENGINE_EXECUTABLE_NAME),
        )
        .unwrap();

        assert!(chain_for(&layout).resolve().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_does_not_qualify() {
        use std::os::unix::fs::PermissionsExt;

        let layout = layout();
        let path = install_fake_engine(&layout.system_dir);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(chain_for(&layout).resolve().is_none());
    }

    #[test]
    fn test_configured_path_with_wrong_name_is_rejected() {
        let layout = layout();
        let wrong_name = layout.app_dir.join("not-an-ocr-engine");
        std::fs::write(&wrong_name, "binary").unwrap();

        let resolver = CandidateListResolver::configured(Some(wrong_name));

        assert!(resolver.resolve().is_none());
    }

    #[test]
    fn test_configured_path_wins_over_bundled() {
        let layout = layout();
        let configured = install_fake_engine(&layout.system_dir);
        install_fake_engine(&layout.app_dir.join(BUNDLED_ENGINE_DIR_NAME));

        let chain = ChainedEngineResolver::new(vec![
            Box::new(CandidateListResolver::configured(Some(configured.clone()))),
            Box::new(CandidateListResolver::bundled(&layout.app_dir)),
        ]);

        let handle = chain.resolve().unwrap();
        assert_eq!(handle.executable(), configured.as_path());
        assert_eq!(handle.source(), EngineSource::Configured);
    }

    #[test]
    fn test_system_candidates_follow_path_order_then_defaults_without_duplicates() {
        let first = PathBuf::from("/first/bin");
        let second = PathBuf::from("/second/bin");
        let path_var = std::env::join_paths([&first, &second]).unwrap();

        let resolver =
            CandidateListResolver::system(Some(path_var), &[second.clone(), PathBuf::from("/opt/bin")]);

        let paths: Vec<PathBuf> = resolver.candidates().iter().map(|c| c.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                first.join(ENGINE_EXECUTABLE_NAME),
                second.join(ENGINE_EXECUTABLE_NAME),
                PathBuf::from("/opt/bin").join(ENGINE_EXECUTABLE_NAME),
            ]
        );
        assert_eq!(resolver.candidates()[0].source, EngineSource::SearchPath);
        assert_eq!(resolver.candidates()[2].source, EngineSource::SystemDefault);
    }

    #[test]
    fn test_empty_environment_override_is_ignored() {
        let resolver = CandidateListResolver::environment(Some(OsString::new()));

        assert!(resolver.candidates().is_empty());
    }
}
