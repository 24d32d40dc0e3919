//! 倒计时句柄
//!
//! 不依赖线程：宿主循环询问下一次到期时间，到期后由控制器消费。

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    period: Duration,
    next_due: Option<Instant>,
    generation: u64,
}

impl CountdownTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
            generation: 0,
        }
    }

    /// 启动计时；已在运行时替换旧句柄，保证同一时刻只有一个
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_some() {
            tracing::debug!(generation = self.generation, "替换仍在运行的计时器");
        }
        self.generation += 1;
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 距离下一次到期的时间；未启动时为 `None`
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// 取出已到期的周期数，并把下一次到期时间向后推
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_timer_never_fires() {
        let mut timer = CountdownTimer::new(Duration::from_secs(1));
        let now = Instant::now();
        assert!(!timer.is_armed());
        assert_eq!(timer.time_until_due(now), None);
        assert_eq!(timer.take_due(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_take_due_counts_elapsed_periods() {
        let mut timer = CountdownTimer::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.arm(start);

        assert_eq!(timer.take_due(start + Duration::from_millis(500)), 0);
        assert_eq!(timer.take_due(start + Duration::from_millis(1000)), 1);
        assert_eq!(timer.take_due(start + Duration::from_millis(3500)), 2);
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(3500)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn test_rearm_replaces_previous_handle() {
        let mut timer = CountdownTimer::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.arm(start);
        timer.arm(start + Duration::from_millis(800));

        assert_eq!(timer.generation(), 2);
        // 旧句柄的到期时间已失效
        assert_eq!(timer.take_due(start + Duration::from_millis(1000)), 0);
        assert_eq!(timer.take_due(start + Duration::from_millis(1800)), 1);
    }

    #[test]
    fn test_cancel() {
        let mut timer = CountdownTimer::new(Duration::from_secs(1));
        let start = Instant::now();
        timer.arm(start);
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.take_due(start + Duration::from_secs(5)), 0);
    }
}
