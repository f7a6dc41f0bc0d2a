use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{DistanceSensor, LightSensor, LineReading, LineSensor};

#[derive(Debug)]
struct Feed<T> {
    queued: VecDeque<T>,
    current: T,
    reads: u64,
}

/// 读数可编排的传感器 mock
///
/// 队列中有值时依次返回，队列耗尽后保持最后一个读数。
#[derive(Debug, Clone)]
pub struct MockSensor<T> {
    feed: Arc<Mutex<Feed<T>>>,
}

impl<T: Copy> MockSensor<T> {
    pub fn new(initial: T) -> Self {
        Self {
            feed: Arc::new(Mutex::new(Feed {
                queued: VecDeque::new(),
                current: initial,
                reads: 0,
            })),
        }
    }

    /// 立即替换当前读数并丢弃排队的读数
    pub fn set(&self, value: T) {
        let mut feed = self.feed.lock();
        feed.queued.clear();
        feed.current = value;
    }

    /// 追加一个读数，后续采样依次取出
    pub fn push(&self, value: T) {
        self.feed.lock().queued.push_back(value);
    }

    /// 已被采样的次数
    pub fn reads(&self) -> u64 {
        self.feed.lock().reads
    }

    fn sample(&self) -> T {
        let mut feed = self.feed.lock();
        feed.reads += 1;
        if let Some(next) = feed.queued.pop_front() {
            feed.current = next;
        }
        feed.current
    }
}

impl DistanceSensor for MockSensor<f32> {
    fn read_distance(&mut self) -> f32 {
        self.sample()
    }
}

impl LightSensor for MockSensor<u16> {
    fn read_light_level(&mut self) -> u16 {
        self.sample()
    }
}

impl LineSensor for MockSensor<LineReading> {
    fn read_line(&mut self) -> LineReading {
        self.sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_then_sticky() {
        let mut sensor = MockSensor::new(100.0f32);
        let handle = sensor.clone();
        handle.push(30.0);
        handle.push(20.0);

        assert_eq!(sensor.read_distance(), 30.0);
        assert_eq!(sensor.read_distance(), 20.0);
        assert_eq!(sensor.read_distance(), 20.0);
        assert_eq!(handle.reads(), 3);

        handle.set(-1.0);
        assert_eq!(sensor.read_distance(), -1.0);
    }

    #[test]
    fn test_line_sensor() {
        let mut sensor = MockSensor::new(LineReading::default());
        sensor.set(LineReading::new(true, true, false));
        assert_eq!(sensor.read_line(), LineReading::new(true, true, false));
    }
}
