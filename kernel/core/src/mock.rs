//! In-memory kernel used by the unit tests.

use std::{
    cell::Cell,
    collections::HashMap,
    rc::Rc,
    sync::{Arc, Mutex, Once},
};

use crate::{
    dispatch::CompleteRequest,
    handler::ProcessTable,
    inspect::{DeviceInfo, ImageNames, IO_TYPE_DEVICE},
    lifecycle::DeviceFactory,
    object::ObjectManager,
    DriverError, DriverResult,
};

pub struct MockDriver {
    name: String,
    image: Option<ImageNames>,
    device_path: Option<String>,
    device: DeviceInfo,
    /* the object manager itself holds one reference */
    references: Cell<usize>,
}

impl MockDriver {
    pub fn new(name: &str) -> Self {
        let base_name = format!(
            "{}.sys",
            name.rsplit('\\').next().unwrap_or(name).to_ascii_lowercase()
        );

        Self {
            name: name.to_string(),
            image: Some(ImageNames {
                full_path: format!("\\SystemRoot\\System32\\drivers\\{}", base_name),
                base_name,
            }),
            device_path: None,
            device: DeviceInfo {
                object_type: IO_TYPE_DEVICE,
                device_type: 0x22,
                flags: 0x40,
                active_thread_count: 0,
            },
            references: Cell::new(1),
        }
    }

    pub fn without_image(mut self) -> Self {
        self.image = None;
        self
    }

    pub fn with_device(mut self, path: &str) -> Self {
        self.device_path = Some(path.to_string());
        self
    }

    pub fn with_active_threads(mut self, count: u32) -> Self {
        self.device.active_thread_count = count;
        self
    }

    pub fn with_object_type(mut self, object_type: u16) -> Self {
        self.device.object_type = object_type;
        self
    }
}

pub struct MockDevice {
    pub path: String,
    alive: Rc<Cell<usize>>,
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.alive.set(self.alive.get() - 1);
    }
}

pub struct MockLink {
    pub path: String,
    alive: Rc<Cell<usize>>,
}

impl Drop for MockLink {
    fn drop(&mut self) {
        self.alive.set(self.alive.get() - 1);
    }
}

#[derive(Default)]
pub struct MockKernel {
    drivers: Vec<MockDriver>,
    lookups: Cell<usize>,
    releases: Cell<usize>,
    open_files: Cell<usize>,

    fail_device: bool,
    fail_link: bool,
    devices_created: Cell<usize>,
    devices_alive: Rc<Cell<usize>>,
    links_alive: Rc<Cell<usize>>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_driver(mut self, driver: MockDriver) -> Self {
        self.drivers.push(driver);
        self
    }

    pub fn failing_device_creation(mut self) -> Self {
        self.fail_device = true;
        self
    }

    pub fn failing_link_creation(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub fn reference_count(&self, name: &str) -> usize {
        self.drivers
            .iter()
            .find(|driver| driver.name == name)
            .map(|driver| driver.references.get())
            .unwrap_or(0)
    }

    pub fn outstanding_references(&self) -> usize {
        self.drivers
            .iter()
            .map(|driver| driver.references.get() - 1)
            .sum()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.get()
    }

    pub fn release_count(&self) -> usize {
        self.releases.get()
    }

    pub fn open_files(&self) -> usize {
        self.open_files.get()
    }

    pub fn devices_created(&self) -> usize {
        self.devices_created.get()
    }

    pub fn devices_alive(&self) -> usize {
        self.devices_alive.get()
    }

    pub fn links_alive(&self) -> usize {
        self.links_alive.get()
    }
}

impl ObjectManager for MockKernel {
    type Driver = usize;
    type File = usize;
    type Device = usize;

    fn reference_driver_by_name(&self, name: &str) -> Option<usize> {
        self.lookups.set(self.lookups.get() + 1);

        let index = self
            .drivers
            .iter()
            .position(|driver| driver.name.eq_ignore_ascii_case(name))?;
        let driver = &self.drivers[index];
        driver.references.set(driver.references.get() + 1);
        Some(index)
    }

    unsafe fn release_driver(&self, driver: usize) {
        let driver = &self.drivers[driver];
        assert!(driver.references.get() > 1, "released more often than referenced");
        driver.references.set(driver.references.get() - 1);
        self.releases.set(self.releases.get() + 1);
    }

    fn reference_device_by_path(&self, path: &str) -> Option<(usize, usize)> {
        self.lookups.set(self.lookups.get() + 1);

        let index = self.drivers.iter().position(|driver| {
            driver
                .device_path
                .as_deref()
                .map_or(false, |device| device.eq_ignore_ascii_case(path))
        })?;
        self.open_files.set(self.open_files.get() + 1);
        Some((self.open_files.get(), index))
    }

    unsafe fn release_file(&self, _file: usize) {
        assert!(self.open_files.get() > 0, "file object released twice");
        self.open_files.set(self.open_files.get() - 1);
    }

    unsafe fn device_owner(&self, device: usize) -> usize {
        device
    }

    unsafe fn image_names(&self, driver: usize) -> Option<ImageNames> {
        self.drivers[driver].image.clone()
    }

    unsafe fn first_device(&self, driver: usize) -> Option<DeviceInfo> {
        let driver = &self.drivers[driver];
        driver.device_path.as_ref().map(|_| driver.device)
    }
}

impl DeviceFactory for MockKernel {
    type Device = MockDevice;
    type Link = MockLink;

    fn create_device(&self, device_path: &str) -> DriverResult<MockDevice> {
        if self.fail_device {
            return Err(DriverError::Unsuccessful);
        }

        self.devices_created.set(self.devices_created.get() + 1);
        self.devices_alive.set(self.devices_alive.get() + 1);
        Ok(MockDevice {
            path: device_path.to_string(),
            alive: self.devices_alive.clone(),
        })
    }

    fn create_symbolic_link(&self, link_path: &str, _device_path: &str) -> DriverResult<MockLink> {
        if self.fail_link {
            return Err(DriverError::Unsuccessful);
        }

        self.links_alive.set(self.links_alive.get() + 1);
        Ok(MockLink {
            path: link_path.to_string(),
            alive: self.links_alive.clone(),
        })
    }
}

#[derive(Default)]
pub struct MockProcesses {
    processes: HashMap<u32, bool>,
}

impl MockProcesses {
    pub fn with_process(mut self, process_id: u32, terminated: bool) -> Self {
        self.processes.insert(process_id, terminated);
        self
    }
}

impl ProcessTable for MockProcesses {
    fn is_terminated(&self, process_id: u32) -> Option<bool> {
        self.processes.get(&process_id).copied()
    }
}

#[derive(Default)]
struct CompletionState {
    completions: usize,
    result: Option<DriverResult<usize>>,
}

/// Records how a request has been completed.
#[derive(Default, Clone)]
pub struct MockCompletion {
    state: Arc<Mutex<CompletionState>>,
}

impl MockCompletion {
    pub fn completions(&self) -> usize {
        self.state.lock().unwrap().completions
    }

    pub fn result(&self) -> Option<DriverResult<usize>> {
        self.state.lock().unwrap().result
    }
}

impl CompleteRequest for MockCompletion {
    type Status = DriverResult<usize>;

    fn complete(self, result: DriverResult<usize>) -> Self::Status {
        let mut state = self.state.lock().unwrap();
        state.completions += 1;
        state.result = Some(result);
        result
    }
}

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

/// Route all log output of the test binary into memory.
pub fn install_capture_logger() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let _ = log::set_logger(&CAPTURE_LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });
}

pub fn captured_logs() -> Vec<String> {
    CAPTURE_LOGGER.lines.lock().unwrap().clone()
}
