use std::time::Instant;

pub trait Clock
{
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock
{
    fn now(&self) -> Instant
    {
        Instant::now()
    }
}

#[derive(Debug, Default)]
pub struct RoundClock
{
    started_at: Option<Instant>,
}

impl RoundClock
{
    pub fn start(&mut self, now: Instant)
    {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn is_started(&self) -> bool
    {
        self.started_at.is_some()
    }

    pub fn reset(&mut self)
    {
        self.started_at = None;
    }

    fn elapsed_secs(&self, now: Instant) -> Option<u64>
    {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs())
    }

    pub fn remaining(&self, limit_secs: u32, now: Instant) -> u32
    {
        match self.elapsed_secs(now) {
            None => limit_secs,
            Some(elapsed) => {
                let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
                limit_secs.saturating_sub(elapsed)
            }
        }
    }

    pub fn is_expired(&self, limit_secs: u32, now: Instant) -> bool
    {
        self.elapsed_secs(now)
            .is_some_and(|elapsed| elapsed >= u64::from(limit_secs))
    }
}
