use super::ScheduleWarning;

/// Consigne un avertissement (et le trace si la feature `logging` est active).
pub(super) fn push_warning(warnings: &mut Vec<ScheduleWarning>, warning: ScheduleWarning) {
    #[cfg(feature = "logging")]
    tracing::warn!(%warning, "schedule degraded");
    warnings.push(warning);
}
