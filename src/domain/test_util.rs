use anyhow::anyhow;

/// Reachability switch for the in-memory driven-port fakes. Flipping a fake to
/// [Connectivity::Disconnected] makes its operations fail the way a real backend
/// outage would.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Fails with a transport-style error while disconnected
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("the backing store is unreachable!")),
        }
    }
}

/// One mockable function: records the arguments of every invocation and hands back
/// a canned return value. Mocking crates struggle with async functions on traits,
/// so mock trait implementations here are hand-rolled from these instead, one field
/// per function.
///
/// * [Args] is what a single invocation captures
/// * [Ret] is the function's return type
///
/// # Example
///
/// ```
/// use domain::test_util::FakeImplementation;
///
/// trait CountingPort {
///   async fn entries_under(&mut self, key: String) -> usize;
/// }
///
/// struct FakeCounter {
///   // String is the captured argument, usize the return value
///   entries_under_result: FakeImplementation<String, usize>,
/// }
///
/// impl CountingPort for FakeCounter {
///   async fn entries_under(&mut self, key: String) -> usize {
///     // Record this invocation
///     self.entries_under_result.save_arguments(key);
///
///     // Answer with the canned value
///     self.entries_under_result.return_value()
///   }
/// }
/// ```
///
pub struct FakeImplementation<Args, Ret> {
    captured_calls: Vec<Args>,
    canned_return: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    /// Builds a fake with no calls recorded and no return value configured
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            captured_calls: Vec::new(),
            canned_return: None,
        }
    }

    /// Records the arguments of one invocation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.captured_calls.push(arguments)
    }

    /// The recorded arguments of every invocation so far, oldest first
    pub fn calls(&self) -> &[Args] {
        self.captured_calls.as_slice()
    }
}

#[allow(dead_code)]
impl<Args, Ret> FakeImplementation<Args, Ret>
where
    Ret: Clone,
{
    /// Configures the value handed back on every invocation
    pub fn set_return_value(&mut self, return_value: Ret) {
        self.canned_return = Some(return_value)
    }

    /// A copy of the configured return value
    pub fn return_value(&self) -> Ret {
        match &self.canned_return {
            Some(canned) => canned.clone(),
            None => panic!("A fake was invoked without a configured return value!"),
        }
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Configures the [Result] handed back on every invocation. [Result] itself is
    /// not [Clone], so this variant applies when both of its sides are.
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.canned_return = Some(return_value)
    }

    /// A copy of the configured [Result]
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match &self.canned_return {
            Some(Ok(success)) => Ok(success.clone()),
            Some(Err(failure)) => Err(failure.clone()),
            None => panic!("A fake was invoked without a configured return value!"),
        }
    }
}

impl<Args, Success> FakeImplementation<Args, anyhow::Result<Success>>
where
    Success: Clone,
{
    /// Configures an [anyhow::Result] return. [anyhow::Error] is not [Clone], so
    /// the error is rebuilt from its message each time it is handed back.
    pub fn set_returned_anyhow(&mut self, return_value: anyhow::Result<Success>) {
        self.canned_return = match return_value {
            Ok(success) => Some(Ok(success)),
            Err(failure) => Some(Err(anyhow!(failure.to_string()))),
        }
    }

    /// A rebuilt copy of the configured [anyhow::Result]
    pub fn return_value_anyhow(&self) -> anyhow::Result<Success> {
        match &self.canned_return {
            Some(Ok(success)) => Ok(success.clone()),
            Some(Err(failure)) => Err(anyhow!(failure.to_string())),
            None => panic!("A fake was invoked without a configured return value!"),
        }
    }
}
