//! 网络空闲检测
//!
//! 页面在连续 `quiet` 时长内没有任何进行中的网络请求，即视为空闲。
//! 监听器必须在加载内容之前挂上，否则会漏掉最早发出的请求。

use std::collections::HashSet;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::Page;
use futures::stream::{self, LocalBoxStream, PollNext, Stream};
use futures::StreamExt;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::error::{ConvertError, ConvertResult};

/// 进行中请求的计数器
#[derive(Debug, Default)]
pub struct InflightTracker {
    inflight: HashSet<String>,
}

impl InflightTracker {
    pub fn started(&mut self, request_id: impl Into<String>) {
        self.inflight.insert(request_id.into());
    }

    /// 请求结束（成功或失败）。未知的请求 ID 直接忽略
    pub fn finished(&mut self, request_id: &str) {
        self.inflight.remove(request_id);
    }

    pub fn inflight(&self) -> usize {
        self.inflight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.inflight.is_empty()
    }
}

/// 从 CDP 网络事件中提取出的请求开始 / 结束信号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSignal {
    Started(String),
    Finished(String),
}

/// 合并开始流和结束流
///
/// 两条流都有数据时总是先取开始流：同一个请求的 requestWillBeSent
/// 一定比它的 loadingFinished 先到，先处理结束会让请求永远留在计数器里。
pub fn merge_signals<R, F>(requests: R, finished: F) -> impl Stream<Item = NetworkSignal>
where
    R: Stream<Item = NetworkSignal>,
    F: Stream<Item = NetworkSignal>,
{
    stream::select_with_strategy(requests, finished, |_: &mut ()| PollNext::Left)
}

/// 挂在单个页面上的网络空闲监听器
pub struct NetworkIdleWatcher {
    signals: LocalBoxStream<'static, NetworkSignal>,
    tracker: InflightTracker,
    quiet: Duration,
}

impl NetworkIdleWatcher {
    pub fn new(signals: impl Stream<Item = NetworkSignal> + 'static, quiet: Duration) -> Self {
        Self {
            signals: signals.boxed_local(),
            tracker: InflightTracker::default(),
            quiet,
        }
    }

    /// 启用 Network 域并订阅请求事件
    pub async fn attach(page: &Page, quiet: Duration) -> ConvertResult<Self> {
        page.execute(EnableParams::default())
            .await
            .map_err(|e| ConvertError::SessionCreate(format!("启用 Network 域失败: {}", e)))?;

        let requests = page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| ConvertError::SessionCreate(e.to_string()))?
            .map(|event| NetworkSignal::Started(event.request_id.inner().clone()));
        let finished = page
            .event_listener::<EventLoadingFinished>()
            .await
            .map_err(|e| ConvertError::SessionCreate(e.to_string()))?
            .map(|event| NetworkSignal::Finished(event.request_id.inner().clone()));
        let failed = page
            .event_listener::<EventLoadingFailed>()
            .await
            .map_err(|e| ConvertError::SessionCreate(e.to_string()))?
            .map(|event| {
                debug!("请求失败: {}", event.error_text);
                NetworkSignal::Finished(event.request_id.inner().clone())
            });

        let signals = merge_signals(requests, stream::select(finished, failed));
        Ok(Self::new(signals, quiet))
    }

    /// 等待网络空闲，超时返回 `ConvertError::IdleTimeout`
    pub async fn wait(&mut self, limit: Duration) -> ConvertResult<()> {
        let waited = timeout(limit, self.wait_quiet()).await;
        match waited {
            Ok(()) => {
                debug!("网络已空闲");
                Ok(())
            }
            Err(_) => Err(ConvertError::IdleTimeout {
                timeout_ms: duration_millis(limit),
                inflight: self.tracker.inflight(),
            }),
        }
    }

    async fn wait_quiet(&mut self) {
        loop {
            if self.tracker.is_idle() {
                let next = tokio::select! {
                    biased;
                    signal = self.signals.next() => signal,
                    _ = sleep(self.quiet) => return,
                };
                match next {
                    Some(signal) => self.apply(signal),
                    None => return,
                }
            } else {
                match self.signals.next().await {
                    Some(signal) => self.apply(signal),
                    None => {
                        // 事件流已关闭，页面已经不在了，交给导出步骤报错
                        warn!("网络事件流已关闭，仍有 {} 个请求未完成", self.tracker.inflight());
                        return;
                    }
                }
            }
        }
    }

    fn apply(&mut self, signal: NetworkSignal) {
        match signal {
            NetworkSignal::Started(id) => self.tracker.started(id),
            NetworkSignal::Finished(id) => self.tracker.finished(&id),
        }
    }
}

/// 毫秒数，超出 u64 时取上限
fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use std::time::Instant;

    fn started(id: &str) -> NetworkSignal {
        NetworkSignal::Started(id.to_string())
    }

    fn finished(id: &str) -> NetworkSignal {
        NetworkSignal::Finished(id.to_string())
    }

    #[test]
    fn test_tracker_idle_after_all_finished() {
        let mut tracker = InflightTracker::default();
        assert!(tracker.is_idle());

        tracker.started("1");
        tracker.started("2");
        assert_eq!(tracker.inflight(), 2);

        tracker.finished("1");
        assert!(!tracker.is_idle());
        tracker.finished("2");
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_tracker_redirect_reuses_request_id() {
        // 重定向时同一个 request id 会再次出现在 requestWillBeSent 中
        let mut tracker = InflightTracker::default();
        tracker.started("1");
        tracker.started("1");
        assert_eq!(tracker.inflight(), 1);
        tracker.finished("1");
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_tracker_ignores_unknown_ids() {
        let mut tracker = InflightTracker::default();
        tracker.finished("missing");
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_duration_millis_saturates() {
        assert_eq!(duration_millis(Duration::from_millis(30_000)), 30_000);
        assert_eq!(duration_millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_merge_prefers_started_when_both_buffered() {
        let (req_tx, req_rx) = mpsc::unbounded();
        let (fin_tx, fin_rx) = mpsc::unbounded();
        fin_tx.unbounded_send(finished("X")).unwrap();
        req_tx.unbounded_send(started("X")).unwrap();
        drop(req_tx);
        drop(fin_tx);

        let merged: Vec<_> = merge_signals(req_rx, fin_rx).collect().await;

        assert_eq!(merged, vec![started("X"), finished("X")]);
    }

    #[tokio::test]
    async fn test_buffered_events_resolve_to_idle() {
        // set_content 返回时，子资源的开始和结束事件通常都已经排队
        for _ in 0..40 {
            let (req_tx, req_rx) = mpsc::unbounded();
            let (fin_tx, fin_rx) = mpsc::unbounded();
            req_tx.unbounded_send(started("X")).unwrap();
            req_tx.unbounded_send(started("Y")).unwrap();
            fin_tx.unbounded_send(finished("X")).unwrap();
            fin_tx.unbounded_send(finished("Y")).unwrap();

            let mut watcher = NetworkIdleWatcher::new(
                merge_signals(req_rx, fin_rx),
                Duration::from_millis(20),
            );

            tokio_test::assert_ok!(watcher.wait(Duration::from_millis(300)).await);
            drop((req_tx, fin_tx));
        }
    }

    #[tokio::test]
    async fn test_inflight_request_times_out() {
        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(started("slow")).unwrap();
        let mut watcher = NetworkIdleWatcher::new(rx, Duration::from_millis(20));

        let err = tokio_test::assert_err!(watcher.wait(Duration::from_millis(100)).await);

        assert!(matches!(
            err,
            ConvertError::IdleTimeout {
                timeout_ms: 100,
                inflight: 1
            }
        ));
        drop(tx);
    }

    #[tokio::test]
    async fn test_new_request_resets_quiet_window() {
        let (tx, rx) = mpsc::unbounded();
        let mut watcher = NetworkIdleWatcher::new(rx, Duration::from_millis(100));

        let sender = tokio::spawn(async move {
            sleep(Duration::from_millis(60)).await;
            tx.unbounded_send(started("late")).unwrap();
            sleep(Duration::from_millis(60)).await;
            tx.unbounded_send(finished("late")).unwrap();
            // 保持发送端存活直到等待结束
            sleep(Duration::from_millis(500)).await;
        });

        let begin = Instant::now();
        tokio_test::assert_ok!(watcher.wait(Duration::from_secs(2)).await);

        // 请求在 120ms 左右结束，之后还需要 100ms 的静默
        assert!(begin.elapsed() >= Duration::from_millis(200));
        sender.abort();
    }
}
