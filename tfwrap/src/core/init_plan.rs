//! Decide which steps `tfwrap init` performs.

/// Facts about the invocation and the working directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitInputs {
    /// `--force`: refresh the lock file even if it exists.
    pub force: bool,
    /// `--clean`: delete the lock file before initializing.
    pub clean: bool,
    /// `--dry`: print commands instead of running them.
    pub dry: bool,
    pub lock_file_exists: bool,
    /// `.static` sentinel present in the working directory.
    pub is_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitPlan {
    pub remove_lock_file: bool,
    /// The lock file will be regenerated (plugin cache disabled for `init`).
    pub refresh_lock: bool,
    pub run_init: bool,
    pub run_providers_lock: bool,
}

pub fn plan_init(inputs: InitInputs) -> InitPlan {
    let refresh_lock = inputs.force || inputs.clean || !inputs.lock_file_exists;
    InitPlan {
        remove_lock_file: inputs.clean && inputs.lock_file_exists && !inputs.dry,
        refresh_lock,
        run_init: !inputs.is_static,
        run_providers_lock: refresh_lock && !inputs.dry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_lock_file_is_left_alone() {
        let plan = plan_init(InitInputs {
            lock_file_exists: true,
            ..InitInputs::default()
        });
        assert_eq!(
            plan,
            InitPlan {
                remove_lock_file: false,
                refresh_lock: false,
                run_init: true,
                run_providers_lock: false,
            }
        );
    }

    #[test]
    fn missing_lock_file_forces_refresh() {
        let plan = plan_init(InitInputs::default());
        assert!(plan.refresh_lock);
        assert!(plan.run_providers_lock);
    }

    #[test]
    fn dry_run_never_locks_or_deletes() {
        let plan = plan_init(InitInputs {
            force: true,
            clean: true,
            dry: true,
            lock_file_exists: true,
            is_static: false,
        });
        assert!(plan.refresh_lock);
        assert!(!plan.run_providers_lock);
        assert!(!plan.remove_lock_file);
        assert!(plan.run_init);
    }

    #[test]
    fn clean_removes_existing_lock_file() {
        let plan = plan_init(InitInputs {
            clean: true,
            lock_file_exists: true,
            ..InitInputs::default()
        });
        assert!(plan.remove_lock_file);
        assert!(plan.run_providers_lock);
    }

    #[test]
    fn static_directory_skips_init_but_still_locks() {
        let plan = plan_init(InitInputs {
            is_static: true,
            force: true,
            lock_file_exists: true,
            ..InitInputs::default()
        });
        assert!(!plan.run_init);
        assert!(plan.run_providers_lock);
    }
}
