use get_shit_done::core::{CacheRefresher, Environment, Notifier};
use get_shit_done::{
    App, DomainStore, GsdError, HostsBlockManager, LocalStorage, Mode, RefreshOutcome, Result,
    Settings,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct HomeOnly(PathBuf);

impl Environment for HomeOnly {
    fn is_privileged(&self) -> bool {
        true
    }

    fn home_dir(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl CacheRefresher for &Recorder {
    fn refresh(&self) -> Result<RefreshOutcome> {
        self.events.borrow_mut().push("refresh".to_string());
        Ok(RefreshOutcome::Refreshed)
    }
}

impl Notifier for &Recorder {
    fn notify(&self, message: &str) {
        self.events.borrow_mut().push(format!("notify: {}", message));
    }
}

type TestApp<'a> = App<LocalStorage, &'a Recorder, &'a Recorder, Vec<u8>>;

struct Fixture {
    temp_dir: TempDir,
    settings: Settings,
}

impl Fixture {
    fn new(hosts: &str, dry_run: bool) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let hosts_path = temp_dir.path().join("hosts");
        std::fs::write(&hosts_path, hosts).unwrap();

        let env = HomeOnly(temp_dir.path().join("home"));
        let settings = Settings::resolve(None, &hosts_path, dry_run, &env).unwrap();
        Self { temp_dir, settings }
    }

    fn app<'a>(&self, recorder: &'a Recorder) -> TestApp<'a> {
        let storage = LocalStorage::new();
        App::new(
            DomainStore::new(storage.clone(), self.settings.store_path.clone()),
            HostsBlockManager::new(storage, recorder, self.settings.hosts.clone()),
            recorder,
            Vec::new(),
            self.settings.dry_run,
        )
    }

    fn run(&self, recorder: &Recorder, modes: &[Mode]) -> Result<String> {
        let mut app = self.app(recorder);
        app.prepare()?;
        for mode in modes {
            app.run(mode)?;
        }
        Ok(String::from_utf8(app.into_output()).unwrap())
    }

    fn hosts(&self) -> String {
        std::fs::read_to_string(&self.settings.hosts.hosts_path).unwrap()
    }

    fn store(&self) -> Option<String> {
        std::fs::read_to_string(&self.settings.store_path).ok()
    }

    fn store_path(&self) -> &Path {
        &self.settings.store_path
    }
}

#[test]
fn test_first_run_list_reports_seed_domain() {
    let fixture = Fixture::new("", false);
    let recorder = Recorder::default();

    let output = fixture.run(&recorder, &[Mode::List]).unwrap();

    assert!(fixture
        .store_path()
        .starts_with(fixture.temp_dir.path().join("home").join(".config")));
    assert_eq!(fixture.store().as_deref(), Some("sites=facebook.com,\n"));
    assert_eq!(output, "Blocked domains:\n - facebook.com\n");
}

#[test]
fn test_full_session() {
    let fixture = Fixture::new("127.0.0.1\tlocalhost\n", false);
    let recorder = Recorder::default();

    let output = fixture
        .run(
            &recorder,
            &[
                Mode::Add("A.com".to_string()),
                Mode::Remove("facebook.com".to_string()),
                Mode::Add("b.com".to_string()),
                Mode::Work,
                Mode::Status,
            ],
        )
        .unwrap();

    assert_eq!(fixture.store().as_deref(), Some("sites=a.com,b.com,\n"));
    assert_eq!(
        fixture.hosts(),
        "127.0.0.1\tlocalhost\n## start-gsd\n127.0.0.1\ta.com\n127.0.0.1\twww.a.com\n\
         127.0.0.1\tb.com\n127.0.0.1\twww.b.com\n## end=gsd\n"
    );
    assert_eq!(output, "Current mode: WORK\n");

    let output = fixture.run(&recorder, &[Mode::Play, Mode::Status]).unwrap();
    assert_eq!(fixture.hosts(), "127.0.0.1\tlocalhost\n");
    assert_eq!(output, "Current mode: PLAY\n");

    assert_eq!(
        recorder.events.borrow().as_slice(),
        [
            "notify: Domain added: A.com",
            "notify: Domain removed: facebook.com",
            "notify: Domain added: b.com",
            "refresh",
            "notify: Work mode activated",
            "notify: Play mode activated",
        ]
    );
}

#[test]
fn test_dry_run_touches_nothing() {
    let original = "foo\n## start-gsd\n127.0.0.1\tx.com\n## end=gsd\nbar\n";
    let fixture = Fixture::new(original, true);
    let recorder = Recorder::default();

    let output = fixture
        .run(&recorder, &[Mode::Play, Mode::Add("y.com".to_string())])
        .unwrap();

    assert_eq!(fixture.hosts(), original);
    assert_eq!(fixture.store(), None);
    assert!(recorder.events.borrow().is_empty());
    assert_eq!(
        output,
        format!(
            "Dry run: Would create {store} with default domains\n\
             Dry run: Would remove the following lines from hosts file:\n\
             ## start-gsd\n127.0.0.1\tx.com\n## end=gsd\n\
             Dry run: Would add domain y.com to {store}\n",
            store = fixture.store_path().display()
        )
    );
}

#[test]
fn test_work_twice_reports_already_active() {
    let fixture = Fixture::new("", false);
    let recorder = Recorder::default();

    fixture.run(&recorder, &[Mode::Work]).unwrap();
    let before = fixture.hosts();

    let err = fixture.run(&recorder, &[Mode::Work]).unwrap_err();

    assert!(matches!(err, GsdError::AlreadyActive { .. }));
    assert_eq!(err.user_friendly_message(), "Work mode already set");
    assert_eq!(fixture.hosts(), before);
}
