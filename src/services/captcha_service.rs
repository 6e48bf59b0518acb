use crate::error::{AppError, AppResult};
use crate::models::CaptchaResponse;
use crate::utils::{generate_captcha_code, render_captcha_svg};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const CAPTCHA_FAILED: &str = "驗證碼錯誤或已過期";

#[derive(Debug, Clone)]
struct CaptchaEntry {
    code: String,
    expires_at: DateTime<Utc>,
}

// order 按发放先后排列；所有项目 TTL 相同，队首即最早过期
#[derive(Debug, Default)]
struct CaptchaStore {
    entries: HashMap<String, CaptchaEntry>,
    order: VecDeque<String>,
}

impl CaptchaStore {
    fn purge(&mut self, now: DateTime<Utc>, max_entries: usize) {
        while let Some(front) = self.order.front() {
            let stale = match self.entries.get(front) {
                Some(entry) => entry.expires_at <= now,
                None => true,
            };
            if !stale && self.order.len() < max_entries {
                break;
            }
            if let Some(id) = self.order.pop_front() {
                self.entries.remove(&id);
            }
        }
    }
}

/// 进程内验证码存储；多实例部署时各实例独立。
/// 超过 max_entries 时淘汰最早发放的项目。
#[derive(Clone)]
pub struct CaptchaService {
    store: Arc<RwLock<CaptchaStore>>,
    ttl_seconds: i64,
    max_entries: usize,
}

impl CaptchaService {
    pub fn new(ttl_seconds: i64, max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CaptchaStore::default())),
            ttl_seconds,
            max_entries: max_entries.max(1),
        }
    }

    /// 产生新验证码，并顺便清掉过期项目
    pub async fn issue(&self) -> CaptchaResponse {
        let code = generate_captcha_code();
        let captcha_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut store = self.store.write().await;
        store.purge(now, self.max_entries);
        store.entries.insert(
            captcha_id.clone(),
            CaptchaEntry {
                code: code.clone(),
                expires_at: now + Duration::seconds(self.ttl_seconds),
            },
        );
        store.order.push_back(captcha_id.clone());
        drop(store);

        CaptchaResponse {
            captcha_id,
            svg: render_captcha_svg(&code),
            expires_in: self.ttl_seconds,
        }
    }

    /// 校验一次即作废，不论成败；不分大小写
    pub async fn verify(&self, captcha_id: &str, answer: &str) -> AppResult<()> {
        let entry = self.store.write().await.entries.remove(captcha_id);
        match entry {
            Some(entry)
                if entry.expires_at > Utc::now()
                    && entry.code.eq_ignore_ascii_case(answer.trim()) =>
            {
                Ok(())
            }
            _ => Err(AppError::field("captcha_answer", CAPTCHA_FAILED)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn code_of(service: &CaptchaService, id: &str) -> String {
        service.store.read().await.entries[id].code.clone()
    }

    #[tokio::test]
    async fn test_issue_and_verify_case_insensitive() {
        let service = CaptchaService::new(300, 100);
        let issued = service.issue().await;
        assert!(issued.svg.starts_with("<svg"));
        assert_eq!(issued.expires_in, 300);

        let code = code_of(&service, &issued.captcha_id).await;
        assert!(
            service
                .verify(&issued.captcha_id, &code.to_lowercase())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_captcha_is_single_use() {
        let service = CaptchaService::new(300, 100);
        let issued = service.issue().await;
        let code = code_of(&service, &issued.captcha_id).await;

        assert!(service.verify(&issued.captcha_id, "WRONG1").await.is_err());
        // 答错后即作废，正确答案也不再接受
        assert!(service.verify(&issued.captcha_id, &code).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_captcha_is_rejected_and_purged() {
        let service = CaptchaService::new(0, 100);
        let expired = service.issue().await;
        let code = code_of(&service, &expired.captcha_id).await;
        assert!(service.verify(&expired.captcha_id, &code).await.is_err());

        service.issue().await;
        service.issue().await;
        // 每次 issue 都会清掉已过期的项目，只剩最新一笔
        assert_eq!(service.store.read().await.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_store_is_capped_and_evicts_oldest() {
        let service = CaptchaService::new(300, 3);
        let oldest = service.issue().await;
        let mut latest = Vec::new();
        for _ in 0..5 {
            latest.push(service.issue().await);
        }

        let store = service.store.read().await;
        assert_eq!(store.entries.len(), 3);
        assert!(store.order.len() <= 3);
        assert!(!store.entries.contains_key(&oldest.captcha_id));
        for issued in &latest[2..] {
            assert!(store.entries.contains_key(&issued.captcha_id));
        }
    }

    #[tokio::test]
    async fn test_verified_ids_do_not_grow_the_queue() {
        let service = CaptchaService::new(300, 3);
        for _ in 0..10 {
            let issued = service.issue().await;
            let code = code_of(&service, &issued.captcha_id).await;
            service.verify(&issued.captcha_id, &code).await.unwrap();
        }
        assert!(service.store.read().await.order.len() <= 3);
    }

    #[tokio::test]
    async fn test_unknown_id_is_rejected() {
        let service = CaptchaService::new(300, 100);
        let err = service.verify("missing", "ABCDEF").await.unwrap_err();
        assert!(matches!(err, AppError::FieldErrors(f) if f["captcha_answer"][0] == CAPTCHA_FAILED));
    }
}
