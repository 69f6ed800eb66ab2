use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::{debug, warn};

use models::{api_key, service, version};

use crate::catalog::domain::{NewVersion, ServiceDetail, ServiceQuery, ServiceSummary, SortKey, Version};
use crate::catalog::repository::{ApiKeyRepository, ServiceRepository, VersionRepository};
use crate::errors::ServiceError;

/// SeaORM-backed storage over a single SQLite pool.
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

/// `%term%` with LIKE metacharacters escaped, lowercased for a case-insensitive match.
fn like_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_ascii_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

fn filter_condition(term: &str) -> Condition {
    let lower = |col: service::Column| Expr::expr(Func::lower(Expr::col((service::Entity, col))));
    Condition::any()
        .add(lower(service::Column::Name).like(like_pattern(term)))
        .add(lower(service::Column::Description).like(like_pattern(term)))
}

#[async_trait]
impl ServiceRepository for SeaOrmStorage {
    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<ServiceSummary>, ServiceError> {
        let mut select = service::Entity::find();
        if let Some(term) = query.filter.as_deref() {
            select = select.filter(filter_condition(term));
        }
        select = match query.sort {
            Some(SortKey::CreatedAt) => select.order_by_asc(service::Column::CreatedAt),
            Some(SortKey::Name) => select.order_by_asc(service::Column::Name),
            None => select,
        };
        // stable pages under ties
        select = select.order_by_asc(service::Column::Id);

        let p = query.pagination;
        debug!(filter = ?query.filter, sort = ?query.sort, page = p.page, limit = p.limit, offset = p.offset(), "list services query");
        let services = select
            .limit(p.limit)
            .offset(p.offset())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // one batched IN (...) query for every service on this page
        let versions = services.load_many(version::Entity, &self.db).await.map_err(db_err)?;
        Ok(services
            .into_iter()
            .zip(versions)
            .map(|(svc, vs)| ServiceSummary::from_parts(svc, vs))
            .collect())
    }

    async fn get_service(&self, id: i32) -> Result<Option<ServiceDetail>, ServiceError> {
        let mut rows = service::Entity::find_by_id(id)
            .find_with_related(version::Entity)
            .order_by_asc(version::Column::CreatedAt)
            .order_by_asc(version::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.pop().map(|(svc, vs)| ServiceDetail::from_parts(svc, vs)))
    }

    async fn create_service(&self, name: &str, description: &str) -> Result<i32, ServiceError> {
        let am = service::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let res = service::Entity::insert(am).exec(&self.db).await.map_err(db_err)?;
        Ok(res.last_insert_id)
    }

    async fn update_service(&self, id: i32, name: &str, description: &str) -> Result<(), ServiceError> {
        let res = service::Entity::update_many()
            .col_expr(service::Column::Name, Expr::value(name))
            .col_expr(service::Column::Description, Expr::value(description))
            .filter(service::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("Service"));
        }
        Ok(())
    }

    async fn delete_service(&self, id: i32) -> Result<(), ServiceError> {
        service::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl VersionRepository for SeaOrmStorage {
    async fn create_version(&self, input: NewVersion) -> Result<i32, ServiceError> {
        let service_id = input.service_id;
        let am = version::ActiveModel {
            service_id: Set(input.service_id),
            version: Set(input.version),
            changelog: Set(input.changelog),
            created_at: Set(input.created_at),
            ..Default::default()
        };
        match version::Entity::insert(am).exec(&self.db).await {
            Ok(res) => Ok(res.last_insert_id),
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                    return Err(ServiceError::not_found("Service"));
                }
                let owner = service::Entity::find_by_id(service_id).count(&self.db).await.map_err(db_err)?;
                if owner == 0 {
                    return Err(ServiceError::not_found("Service"));
                }
                Err(db_err(e))
            }
        }
    }

    async fn list_versions(&self, service_id: i32) -> Result<Vec<Version>, ServiceError> {
        let rows = version::Entity::find()
            .filter(version::Column::ServiceId.eq(service_id))
            .order_by_desc(version::Column::CreatedAt)
            .order_by_desc(version::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Version::from).collect())
    }

    async fn get_version(&self, id: i32) -> Result<Option<Version>, ServiceError> {
        let found = version::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(Version::from))
    }

    async fn delete_version(&self, id: i32) -> Result<bool, ServiceError> {
        let res = version::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}

#[async_trait]
impl ApiKeyRepository for SeaOrmStorage {
    async fn is_valid_api_key(&self, key: &str) -> bool {
        match api_key::Entity::find()
            .filter(api_key::Column::Key.eq(key))
            .count(&self.db)
            .await
        {
            Ok(n) => n > 0,
            Err(e) => {
                warn!(error = %e, "api key lookup failed; rejecting");
                false
            }
        }
    }

    async fn count_api_keys(&self) -> Result<u64, ServiceError> {
        api_key::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn insert_api_key(&self, key: &str) -> Result<(), ServiceError> {
        let am = api_key::ActiveModel {
            key: Set(key.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        api_key::Entity::insert(am).exec(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
