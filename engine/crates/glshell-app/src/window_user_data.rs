use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::app_shared::{AppHandle, AppShared};

/// 窗口 id 到 app 的映射
///
/// 窗口系统的回调只带窗口 id，通过这里找回对应的 app。
/// 只保存弱引用，app 结束之后查找结果为 `None`。
#[derive(Debug)]
pub struct WindowUserData<K> {
    slots: HashMap<K, AppHandle>,
}
impl<K: Eq + Hash> Default for WindowUserData<K> {
    fn default() -> Self {
        Self { slots: HashMap::new() }
    }
}
impl<K: Eq + Hash> WindowUserData<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn associate(&mut self, window: K, owner: AppHandle) {
        self.slots.insert(window, owner);
    }

    pub fn dissociate(&mut self, window: &K) {
        self.slots.remove(window);
    }

    /// 没有关联或者 app 已经销毁时返回 `None`
    pub fn owner(&self, window: &K) -> Option<Arc<AppShared>> {
        self.slots.get(window).and_then(AppHandle::get)
    }
}
