/// Recommended error type for [crate::benchmark::Benchmark] implementations and any shared code
/// that they call. Any error can be propagated with `?` and the ramp will report it against the
/// generation that failed.
pub type RampResult<T> = anyhow::Result<T>;
