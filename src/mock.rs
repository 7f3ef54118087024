//! In-memory hosts for exercising the probes without a browser.
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{pending, ready, Either, Pending, Ready};

use crate::compute::{Adapter, AdapterDescriptor, ComputeOptions, Gpu, Limit, RequestError};
use crate::host::Host;
use crate::raster::extensions::debug_renderer_info::{
    UNMASKED_RENDERER_WEBGL, UNMASKED_VENDOR_WEBGL,
};
use crate::raster::{
    ContextOptions, Parameter, ParameterValue, PowerPreference, RasterContext, RasterSurface,
};
use crate::shared_memory::{AllocationError, SharedMemory};
use crate::timeout::Timer;

const DEBUG_RENDERER_INFO: &str = "WEBGL_debug_renderer_info";

#[derive(Clone, Debug)]
pub struct MockContext {
    extensions: Vec<String>,
    parameters: BTreeMap<u32, ParameterValue>,
}

impl MockContext {
    /// A context resembling a desktop browser, reporting a value for every parameter.
    pub fn typical() -> Self {
        let mut parameters = BTreeMap::new();

        for parameter in Parameter::ALL {
            let value = match parameter {
                Parameter::Renderer => ParameterValue::Text("WebKit WebGL".to_string()),
                Parameter::Vendor => ParameterValue::Text("WebKit".to_string()),
                Parameter::Version => ParameterValue::Text("WebGL 2.0".to_string()),
                Parameter::ShadingLanguageVersion => {
                    ParameterValue::Text("WebGL GLSL ES 3.00".to_string())
                }
                Parameter::MaxViewportDims => ParameterValue::Dimensions([16384, 16384]),
                Parameter::MaxTextureSize
                | Parameter::MaxCubeMapTextureSize
                | Parameter::MaxRenderbufferSize => ParameterValue::Integer(16384),
                Parameter::Max3dTextureSize => ParameterValue::Integer(2048),
                Parameter::MaxElementIndex => ParameterValue::Integer(4_294_967_294),
                Parameter::MaxUniformBlockSize => ParameterValue::Integer(65536),
                Parameter::MinProgramTexelOffset => ParameterValue::Integer(-8),
                Parameter::MaxProgramTexelOffset => ParameterValue::Integer(7),
                Parameter::MaxClientWaitTimeout => ParameterValue::Integer(0),
                _ => ParameterValue::Integer(16),
            };

            parameters.insert(parameter.id(), value);
        }

        parameters.insert(
            UNMASKED_VENDOR_WEBGL,
            ParameterValue::Text("Mock Vendor Inc.".to_string()),
        );
        parameters.insert(
            UNMASKED_RENDERER_WEBGL,
            ParameterValue::Text("Mock Renderer 9000".to_string()),
        );

        MockContext {
            extensions: vec![
                "EXT_color_buffer_float".to_string(),
                DEBUG_RENDERER_INFO.to_string(),
            ],
            parameters,
        }
    }

    pub fn without_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.remove(&parameter.id());

        self
    }

    pub fn without_extension(mut self, name: &str) -> Self {
        self.extensions.retain(|extension| extension != name);

        self
    }
}

impl RasterContext for MockContext {
    fn supported_extensions(&self) -> Vec<String> {
        self.extensions.clone()
    }

    fn get_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|extension| extension == name)
    }

    fn get_parameter(&self, id: u32) -> Option<ParameterValue> {
        let debug_parameter = id == UNMASKED_VENDOR_WEBGL || id == UNMASKED_RENDERER_WEBGL;

        if debug_parameter && !self.get_extension(DEBUG_RENDERER_INFO) {
            return None;
        }

        self.parameters.get(&id).cloned()
    }
}

/// A context handed out by a [MockSurface], counted as live until dropped.
pub struct LiveContext {
    context: MockContext,
    live: Rc<Cell<usize>>,
}

impl RasterContext for LiveContext {
    fn supported_extensions(&self) -> Vec<String> {
        self.context.supported_extensions()
    }

    fn get_extension(&self, name: &str) -> bool {
        self.context.get_extension(name)
    }

    fn get_parameter(&self, id: u32) -> Option<ParameterValue> {
        self.context.get_parameter(id)
    }
}

impl Drop for LiveContext {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Clone, Copy, Debug)]
enum Availability {
    Strict,
    RelaxedOnly,
    Unavailable,
}

#[derive(Clone)]
pub struct MockSurface {
    context: Option<MockContext>,
    availability: Availability,
    requested: Rc<RefCell<Vec<ContextOptions>>>,
    live: Rc<Cell<usize>>,
}

impl MockSurface {
    fn with(context: Option<MockContext>, availability: Availability) -> Self {
        MockSurface {
            context,
            availability,
            requested: Rc::new(RefCell::new(Vec::new())),
            live: Rc::new(Cell::new(0)),
        }
    }

    /// A surface that provides `context` even when major performance caveats are refused.
    pub fn strict(context: MockContext) -> Self {
        MockSurface::with(Some(context), Availability::Strict)
    }

    /// A surface that only provides `context` when major performance caveats are accepted.
    pub fn relaxed_only(context: MockContext) -> Self {
        MockSurface::with(Some(context), Availability::RelaxedOnly)
    }

    pub fn unavailable() -> Self {
        MockSurface::with(None, Availability::Unavailable)
    }

    pub fn attempts(&self) -> usize {
        self.requested.borrow().len()
    }

    pub fn requested_options(&self) -> Vec<ContextOptions> {
        self.requested.borrow().clone()
    }

    pub fn live_contexts(&self) -> usize {
        self.live.get()
    }
}

impl RasterSurface for MockSurface {
    type Context = LiveContext;

    fn get_context(&self, options: &ContextOptions) -> Option<LiveContext> {
        self.requested.borrow_mut().push(*options);

        let provides = match self.availability {
            Availability::Strict => true,
            Availability::RelaxedOnly => !options.fail_if_major_performance_caveat(),
            Availability::Unavailable => false,
        };

        if !provides {
            return None;
        }

        self.context.clone().map(|context| {
            self.live.set(self.live.get() + 1);

            LiveContext {
                context,
                live: self.live.clone(),
            }
        })
    }
}

#[derive(Default)]
struct GpuCounters {
    adapter_requests: Cell<usize>,
    info_requests: Cell<usize>,
    live_devices: Cell<usize>,
    power_preferences: RefCell<Vec<PowerPreference>>,
}

#[derive(Clone, Debug)]
enum Info {
    Synchronous(AdapterDescriptor),
    Asynchronous(AdapterDescriptor),
    Missing,
}

#[derive(Clone)]
pub struct MockAdapter {
    limits: Vec<(Limit, u64)>,
    features: Vec<String>,
    info: Info,
    device: Result<bool, RequestError>,
    counters: Rc<GpuCounters>,
}

impl MockAdapter {
    pub fn typical() -> Self {
        MockAdapter {
            limits: vec![(Limit::MaxBindGroups, 4), (Limit::MaxBufferSize, 268_435_456)],
            features: vec![
                "texture-compression-bc".to_string(),
                "depth-clip-control".to_string(),
                "float32-filterable".to_string(),
            ],
            info: Info::Synchronous(AdapterDescriptor {
                vendor: Some("mock-vendor".to_string()),
                architecture: Some("mock-architecture".to_string()),
                device: None,
                description: None,
            }),
            device: Ok(true),
            counters: Rc::new(GpuCounters::default()),
        }
    }

    /// Sets the outcome of a device request, `Ok(false)` resolves to no device.
    pub fn with_device(mut self, device: Result<bool, RequestError>) -> Self {
        self.device = device;

        self
    }

    /// Only exposes the adapter info through [Adapter::request_info].
    pub fn with_asynchronous_info(mut self) -> Self {
        self.info = match self.info {
            Info::Synchronous(info) | Info::Asynchronous(info) => Info::Asynchronous(info),
            Info::Missing => Info::Missing,
        };

        self
    }

    pub fn without_info(mut self) -> Self {
        self.info = Info::Missing;

        self
    }
}

pub struct MockDevice {
    counters: Rc<GpuCounters>,
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        let live = &self.counters.live_devices;

        live.set(live.get() - 1);
    }
}

impl Adapter for MockAdapter {
    type Device = MockDevice;

    type RequestDevice = Ready<Result<Option<MockDevice>, RequestError>>;

    type RequestInfo = Ready<Result<AdapterDescriptor, RequestError>>;

    fn request_device(&self) -> Self::RequestDevice {
        let device = match &self.device {
            Ok(true) => {
                let live = &self.counters.live_devices;

                live.set(live.get() + 1);

                Ok(Some(MockDevice {
                    counters: self.counters.clone(),
                }))
            }
            Ok(false) => Ok(None),
            Err(err) => Err(err.clone()),
        };

        ready(device)
    }

    fn limit(&self, limit: Limit) -> Option<u64> {
        self.limits
            .iter()
            .find(|(candidate, _)| *candidate == limit)
            .map(|(_, value)| *value)
    }

    fn features(&self) -> Vec<String> {
        self.features.clone()
    }

    fn info(&self) -> Option<AdapterDescriptor> {
        match &self.info {
            Info::Synchronous(info) => Some(info.clone()),
            _ => None,
        }
    }

    fn request_info(&self) -> Self::RequestInfo {
        let requests = &self.counters.info_requests;

        requests.set(requests.get() + 1);

        match &self.info {
            Info::Synchronous(info) | Info::Asynchronous(info) => ready(Ok(info.clone())),
            Info::Missing => ready(Err(RequestError::Unavailable("requestAdapterInfo"))),
        }
    }
}

#[derive(Clone)]
pub struct MockGpu {
    /// `None` if adapter requests never resolve.
    adapter: Option<Result<Option<MockAdapter>, RequestError>>,
    counters: Rc<GpuCounters>,
}

impl MockGpu {
    pub fn new(adapter: Result<Option<MockAdapter>, RequestError>) -> Self {
        MockGpu {
            adapter: Some(adapter),
            counters: Rc::new(GpuCounters::default()),
        }
    }

    pub fn hanging() -> Self {
        MockGpu {
            adapter: None,
            counters: Rc::new(GpuCounters::default()),
        }
    }

    pub fn adapter_requests(&self) -> usize {
        self.counters.adapter_requests.get()
    }

    pub fn info_requests(&self) -> usize {
        self.counters.info_requests.get()
    }

    pub fn live_devices(&self) -> usize {
        self.counters.live_devices.get()
    }

    pub fn requested_power_preferences(&self) -> Vec<PowerPreference> {
        self.counters.power_preferences.borrow().clone()
    }
}

impl Gpu for MockGpu {
    type Adapter = MockAdapter;

    type RequestAdapter = Either<
        Ready<Result<Option<MockAdapter>, RequestError>>,
        Pending<Result<Option<MockAdapter>, RequestError>>,
    >;

    fn request_adapter(&self, options: &ComputeOptions) -> Self::RequestAdapter {
        let requests = &self.counters.adapter_requests;

        requests.set(requests.get() + 1);
        self.counters
            .power_preferences
            .borrow_mut()
            .push(options.power_preference());

        match &self.adapter {
            Some(Ok(Some(adapter))) => {
                let adapter = MockAdapter {
                    counters: self.counters.clone(),
                    ..adapter.clone()
                };

                Either::Left(ready(Ok(Some(adapter))))
            }
            Some(Ok(None)) => Either::Left(ready(Ok(None))),
            Some(Err(err)) => Either::Left(ready(Err(err.clone()))),
            None => Either::Right(pending()),
        }
    }
}

#[derive(Clone)]
pub struct MockTimer {
    immediate: bool,
    delays: Rc<Cell<usize>>,
}

impl MockTimer {
    /// A timer whose delays never elapse.
    pub fn never() -> Self {
        MockTimer {
            immediate: false,
            delays: Rc::new(Cell::new(0)),
        }
    }

    /// A timer whose delays elapse as soon as they are polled.
    pub fn immediate() -> Self {
        MockTimer {
            immediate: true,
            delays: Rc::new(Cell::new(0)),
        }
    }

    pub fn delays(&self) -> usize {
        self.delays.get()
    }
}

impl Timer for MockTimer {
    type Delay = Either<Ready<()>, Pending<()>>;

    fn delay(&self, _duration: Duration) -> Self::Delay {
        self.delays.set(self.delays.get() + 1);

        if self.immediate {
            Either::Left(ready(()))
        } else {
            Either::Right(pending())
        }
    }
}

#[derive(Clone, Debug)]
enum Allocation {
    Available,
    Null,
    Failing(AllocationError),
}

pub struct MockBuffer {
    live: Rc<Cell<usize>>,
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct MockSharedMemory {
    allocation: Allocation,
    requested: RefCell<Vec<u32>>,
    live: Rc<Cell<usize>>,
}

impl MockSharedMemory {
    fn with(allocation: Allocation) -> Self {
        MockSharedMemory {
            allocation,
            requested: RefCell::new(Vec::new()),
            live: Rc::new(Cell::new(0)),
        }
    }

    pub fn available() -> Self {
        MockSharedMemory::with(Allocation::Available)
    }

    /// A constructor that returns a null handle.
    pub fn null() -> Self {
        MockSharedMemory::with(Allocation::Null)
    }

    pub fn failing(err: AllocationError) -> Self {
        MockSharedMemory::with(Allocation::Failing(err))
    }

    pub fn requested_lengths(&self) -> Vec<u32> {
        self.requested.borrow().clone()
    }

    pub fn live_buffers(&self) -> usize {
        self.live.get()
    }
}

impl SharedMemory for MockSharedMemory {
    type Buffer = MockBuffer;

    fn try_allocate(&self, byte_length: u32) -> Result<Option<MockBuffer>, AllocationError> {
        self.requested.borrow_mut().push(byte_length);

        match &self.allocation {
            Allocation::Available => {
                self.live.set(self.live.get() + 1);

                Ok(Some(MockBuffer {
                    live: self.live.clone(),
                }))
            }
            Allocation::Null => Ok(None),
            Allocation::Failing(err) => Err(err.clone()),
        }
    }
}

pub struct MockHost {
    pub surface: Option<MockSurface>,
    pub gpu: Option<MockGpu>,
    pub shared_memory: MockSharedMemory,
    pub timer: MockTimer,
    pub user_agent: String,
}

impl MockHost {
    /// A host on which every probe succeeds.
    pub fn supported(user_agent: &str) -> Self {
        MockHost {
            surface: Some(MockSurface::strict(MockContext::typical())),
            gpu: Some(MockGpu::new(Ok(Some(MockAdapter::typical())))),
            shared_memory: MockSharedMemory::available(),
            timer: MockTimer::never(),
            user_agent: user_agent.to_string(),
        }
    }
}

impl Host for MockHost {
    type Surface = MockSurface;

    type Gpu = MockGpu;

    type SharedMemory = MockSharedMemory;

    type Timer = MockTimer;

    fn surface(&self) -> Option<&MockSurface> {
        self.surface.as_ref()
    }

    fn gpu(&self) -> Option<&MockGpu> {
        self.gpu.as_ref()
    }

    fn shared_memory(&self) -> &MockSharedMemory {
        &self.shared_memory
    }

    fn timer(&self) -> &MockTimer {
        &self.timer
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }
}
