//! 内存用户注册表
//!
//! 注册表独占用户映射表，其他组件只能通过这里的操作访问用户。
//! 所有写操作在同一把写锁内完成“检查 + 修改”，读操作持有读锁，
//! 因此任何时刻看到的都是一致的快照。

use crate::id::next_id;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use uuid::Uuid;

/// 已注册的用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// 用户的可变字段，用于创建和更新
///
/// 只做结构解析：缺失的字段按空字符串处理，未知字段被忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl UserFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

impl User {
    fn from_fields(id: Uuid, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            address: fields.address,
        }
    }

    /// 替换除 `id` 之外的全部字段
    fn apply(&mut self, fields: UserFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.address = fields.address;
    }
}

/// 注册表操作错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("user not found: {0}")]
    NotFound(Uuid),
}

/// 线程安全的内存用户注册表
///
/// 通常在进程启动时创建一次，以 `Arc<UserRegistry>` 的形式交给处理函数。
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<Uuid, User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // 每个临界区都只对映射表做一次完整的修改，锁中毒时数据仍然一致，直接恢复即可
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 创建用户
    ///
    /// ID 由注册表分配，调用方无法指定。返回已存入的用户。
    pub fn create(&self, fields: UserFields) -> User {
        let mut users = self.write();

        // 128 位ID的碰撞概率可以忽略，但仍然不能覆盖已有记录
        let mut id = next_id();
        while users.contains_key(&id) {
            id = next_id();
        }

        let user = User::from_fields(id, fields);
        users.insert(id, user.clone());
        tracing::debug!(user_id = %id, total = users.len(), "user created");
        user
    }

    /// 返回所有用户的快照，顺序不确定
    pub fn list(&self) -> Vec<User> {
        self.read().values().cloned().collect()
    }

    /// 按ID查询单个用户
    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.read().get(id).cloned()
    }

    /// 更新用户的 `name`、`email`、`address`
    ///
    /// 存在性检查和字段替换在同一把写锁内完成，
    /// 并发的删除不会插入其间，已删除的用户不会被“复活”。
    pub fn update(&self, id: &Uuid, fields: UserFields) -> Result<User, RegistryError> {
        let mut users = self.write();
        let user = users.get_mut(id).ok_or(RegistryError::NotFound(*id))?;
        user.apply(fields);
        tracing::debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    /// 删除用户
    ///
    /// 对同一ID的第二次删除总是返回 [`RegistryError::NotFound`]。
    pub fn delete(&self, id: &Uuid) -> Result<(), RegistryError> {
        let mut users = self.write();
        users.remove(id).ok_or(RegistryError::NotFound(*id))?;
        tracing::debug!(user_id = %id, total = users.len(), "user deleted");
        Ok(())
    }

    /// 当前用户数量
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
