//! 远端实体
//!
//! 任何从服务端拿到、用于展示的值都包在 [`RemoteEntity`] 里。
//! 是否发起请求由显式的 `Loading` 状态决定，而不是"值是否为空"。

/// 远端实体的加载状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemoteEntity<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(T),
    Failed,
}

/// 不带值的加载状态，便于视图只在状态切换时重建
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// 发起加载的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// 仅在从未加载过时发起（挂载时使用）
    Once,
    /// 从未加载或上次失败时发起
    Retry,
    /// 总是发起；已有值在刷新期间保持可见
    Refresh,
}

impl<T> RemoteEntity<T> {
    /// 按策略进入 `Loading`，返回是否需要真正发出请求
    pub fn begin(&mut self, policy: LoadPolicy) -> bool {
        let start = match (policy, &*self) {
            (LoadPolicy::Once, RemoteEntity::NotLoaded) => true,
            (LoadPolicy::Once, _) => false,
            (LoadPolicy::Retry, RemoteEntity::NotLoaded | RemoteEntity::Failed) => true,
            (LoadPolicy::Retry, _) => false,
            (LoadPolicy::Refresh, _) => true,
        };
        if start && !matches!(self, RemoteEntity::Loaded(_)) {
            *self = RemoteEntity::Loading;
        }
        start
    }

    /// 用请求结果落定状态，错误细节由调用方处理
    pub fn resolve<E>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => RemoteEntity::Loaded(value),
            Err(_) => RemoteEntity::Failed,
        };
    }

    pub fn reset(&mut self) {
        *self = RemoteEntity::NotLoaded;
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RemoteEntity::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn status(&self) -> RemoteStatus {
        match self {
            RemoteEntity::NotLoaded => RemoteStatus::NotLoaded,
            RemoteEntity::Loading => RemoteStatus::Loading,
            RemoteEntity::Loaded(_) => RemoteStatus::Loaded,
            RemoteEntity::Failed => RemoteStatus::Failed,
        }
    }

    pub fn is_not_loaded(&self) -> bool {
        matches!(self, RemoteEntity::NotLoaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteEntity::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RemoteEntity::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_only_from_not_loaded() {
        let mut entity = RemoteEntity::<u32>::default();
        assert!(entity.begin(LoadPolicy::Once));
        assert!(entity.is_loading());
        // 加载中再次挂载不会重复请求
        assert!(!entity.begin(LoadPolicy::Once));

        entity.resolve::<()>(Err(()));
        assert!(!entity.begin(LoadPolicy::Once));
        assert!(entity.is_failed());
    }

    #[test]
    fn retry_restarts_failed_entity() {
        let mut entity = RemoteEntity::<u32>::Failed;
        assert!(entity.begin(LoadPolicy::Retry));
        assert!(entity.is_loading());

        entity.resolve::<()>(Ok(3));
        assert!(!entity.begin(LoadPolicy::Retry));
        assert_eq!(entity.value(), Some(&3));
    }

    #[test]
    fn refresh_keeps_previous_value_visible() {
        let mut entity = RemoteEntity::Loaded(30);
        assert!(entity.begin(LoadPolicy::Refresh));
        assert_eq!(entity.value(), Some(&30));

        entity.resolve::<()>(Ok(20));
        assert_eq!(entity.value(), Some(&20));
        assert_eq!(entity.status(), RemoteStatus::Loaded);
    }

    #[test]
    fn refresh_while_loading_still_fires() {
        let mut entity = RemoteEntity::<u32>::Loading;
        assert!(entity.begin(LoadPolicy::Refresh));
        assert!(entity.is_loading());
    }
}
