//! Activation sequence for the click-to-start bootstrap.
//!
//! The sequence is short: detach the listener, remove the placeholder,
//! make sure audio is running, load the module, call its entry. What
//! matters is the ordering and the at-most-once guarantee, so the host
//! side sits behind a trait and the sequence is unit-tested on native
//! with a fake host.

use crate::error::LaunchError;

/// Run-state of the audio playback context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Suspended,
    Running,
    Closed,
}

/// Where the launcher is in its life.
///
/// There is no failure state: a failed step leaves the launcher in
/// `Activating`, which still blocks re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Activating,
    Active,
}

/// Handle to the loaded application module.
pub trait AppModule {
    /// Invoke the module's exported entry function: no arguments, any
    /// return value ignored.
    fn start(&mut self) -> Result<(), LaunchError>;
}

/// Host environment the sequence runs against: two page elements, an
/// audio pipeline, and an asynchronously loadable module.
#[allow(async_fn_in_trait)]
pub trait LaunchHost {
    type Module: AppModule;

    /// Detach the activation listener from the trigger element.
    fn detach_trigger(&mut self) -> Result<(), LaunchError>;

    /// Remove the placeholder display element from the page.
    fn remove_placeholder(&mut self) -> Result<(), LaunchError>;

    /// Run-state of the audio playback context, creating it if needed.
    fn audio_state(&mut self) -> Result<AudioState, LaunchError>;

    /// Ask the audio context to resume; resolves once the host considers
    /// the request satisfied.
    async fn resume_audio(&mut self) -> Result<(), LaunchError>;

    /// Load and initialise the application module.
    async fn load_module(&mut self) -> Result<Self::Module, LaunchError>;
}

/// Drives the one-shot activation sequence.
#[derive(Debug, Default)]
pub struct Launcher {
    phase: Phase,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the activation sequence once.
    ///
    /// Steps execute strictly in order; each await point completes before
    /// the next step begins. The resume request is skipped when the
    /// context is already running. A second call returns
    /// `AlreadyActivated` without touching the host — the listener-side
    /// one-shot semantics make that path unreachable on a real page, but
    /// the guard holds regardless. There is no cancellation: in-flight
    /// work cannot be aborted.
    pub async fn activate<H: LaunchHost>(&mut self, host: &mut H) -> Result<(), LaunchError> {
        if self.phase != Phase::Idle {
            return Err(LaunchError::AlreadyActivated);
        }
        self.phase = Phase::Activating;

        host.detach_trigger()?;
        host.remove_placeholder()?;

        if host.audio_state()? != AudioState::Running {
            host.resume_audio().await?;
        }

        let mut module = host.load_module().await?;
        module.start()?;

        self.phase = Phase::Active;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct FakeModule {
        log: Log,
    }

    impl AppModule for FakeModule {
        fn start(&mut self) -> Result<(), LaunchError> {
            self.log.borrow_mut().push("entry");
            Ok(())
        }
    }

    struct FakeHost {
        log: Log,
        audio: AudioState,
        fail_resume: bool,
        fail_load: bool,
    }

    impl FakeHost {
        fn new(audio: AudioState) -> Self {
            Self {
                log: Rc::new(RefCell::new(Vec::new())),
                audio,
                fail_resume: false,
                fail_load: false,
            }
        }

        fn events(&self) -> Vec<&'static str> {
            self.log.borrow().clone()
        }

        fn count(&self, ev: &str) -> usize {
            self.log.borrow().iter().filter(|e| **e == ev).count()
        }

        fn index_of(&self, ev: &str) -> usize {
            self.log
                .borrow()
                .iter()
                .position(|e| *e == ev)
                .unwrap_or_else(|| panic!("event {ev:?} not recorded"))
        }
    }

    impl LaunchHost for FakeHost {
        type Module = FakeModule;

        fn detach_trigger(&mut self) -> Result<(), LaunchError> {
            self.log.borrow_mut().push("detach");
            Ok(())
        }

        fn remove_placeholder(&mut self) -> Result<(), LaunchError> {
            self.log.borrow_mut().push("placeholder");
            Ok(())
        }

        fn audio_state(&mut self) -> Result<AudioState, LaunchError> {
            self.log.borrow_mut().push("audio_state");
            Ok(self.audio)
        }

        async fn resume_audio(&mut self) -> Result<(), LaunchError> {
            self.log.borrow_mut().push("resume");
            if self.fail_resume {
                return Err(LaunchError::Audio("resume rejected".to_string()));
            }
            self.audio = AudioState::Running;
            Ok(())
        }

        async fn load_module(&mut self) -> Result<FakeModule, LaunchError> {
            self.log.borrow_mut().push("load");
            if self.fail_load {
                return Err(LaunchError::ModuleLoad("fetch failed".to_string()));
            }
            Ok(FakeModule {
                log: self.log.clone(),
            })
        }
    }

    #[test]
    fn suspended_context_runs_every_step_in_order() {
        let mut host = FakeHost::new(AudioState::Suspended);
        let mut launcher = Launcher::new();

        pollster::block_on(launcher.activate(&mut host)).unwrap();

        assert_eq!(
            host.events(),
            vec!["detach", "placeholder", "audio_state", "resume", "load", "entry"]
        );
        assert_eq!(launcher.phase(), Phase::Active);
    }

    #[test]
    fn running_context_skips_the_resume_request() {
        let mut host = FakeHost::new(AudioState::Running);
        let mut launcher = Launcher::new();

        pollster::block_on(launcher.activate(&mut host)).unwrap();

        assert_eq!(
            host.events(),
            vec!["detach", "placeholder", "audio_state", "load", "entry"]
        );
    }

    #[test]
    fn second_activation_is_rejected_and_runs_nothing() {
        let mut host = FakeHost::new(AudioState::Running);
        let mut launcher = Launcher::new();

        pollster::block_on(launcher.activate(&mut host)).unwrap();
        let err = pollster::block_on(launcher.activate(&mut host)).unwrap_err();

        assert!(matches!(err, LaunchError::AlreadyActivated));
        assert_eq!(host.count("load"), 1);
        assert_eq!(host.count("entry"), 1);
        assert_eq!(host.count("detach"), 1);
    }

    #[test]
    fn resume_completes_before_the_module_load_starts() {
        let mut host = FakeHost::new(AudioState::Suspended);
        let mut launcher = Launcher::new();

        pollster::block_on(launcher.activate(&mut host)).unwrap();

        assert!(host.index_of("resume") < host.index_of("load"));
    }

    #[test]
    fn placeholder_goes_away_even_when_the_load_fails() {
        let mut host = FakeHost::new(AudioState::Running);
        host.fail_load = true;
        let mut launcher = Launcher::new();

        let err = pollster::block_on(launcher.activate(&mut host)).unwrap_err();

        assert!(matches!(err, LaunchError::ModuleLoad(_)));
        assert!(host.index_of("placeholder") < host.index_of("load"));
        assert_eq!(host.count("entry"), 0);
        // No failure state: the launcher stays in Activating and keeps
        // blocking re-entry.
        assert_eq!(launcher.phase(), Phase::Activating);
        let err = pollster::block_on(launcher.activate(&mut host)).unwrap_err();
        assert!(matches!(err, LaunchError::AlreadyActivated));
        assert_eq!(host.count("load"), 1);
    }

    #[test]
    fn failed_resume_never_reaches_the_module() {
        let mut host = FakeHost::new(AudioState::Suspended);
        host.fail_resume = true;
        let mut launcher = Launcher::new();

        let err = pollster::block_on(launcher.activate(&mut host)).unwrap_err();

        assert!(matches!(err, LaunchError::Audio(_)));
        assert_eq!(host.count("load"), 0);
        assert_eq!(host.count("entry"), 0);
    }

    #[test]
    fn entry_runs_once_and_only_after_the_load() {
        let mut host = FakeHost::new(AudioState::Running);
        let mut launcher = Launcher::new();

        pollster::block_on(launcher.activate(&mut host)).unwrap();

        assert_eq!(host.count("entry"), 1);
        assert!(host.index_of("load") < host.index_of("entry"));
    }
}
