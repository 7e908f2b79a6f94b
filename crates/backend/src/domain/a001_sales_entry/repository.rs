use anyhow::Result;
use contracts::domain::a001_sales_entry::{SalesEntryListRequest, SalesRecord};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_sales_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    // Document
    pub invoice_no: String,
    pub status: String,
    pub date: String,
    #[sea_orm(nullable)]
    pub term_days: Option<i32>,
    #[sea_orm(nullable)]
    pub due_date: Option<String>,

    // Dimensions
    #[sea_orm(nullable)]
    pub customer: Option<String>,
    #[sea_orm(nullable)]
    pub product: Option<String>,
    pub revenue_category: String,
    #[sea_orm(nullable)]
    pub revenue_type: Option<String>,
    #[sea_orm(nullable)]
    pub unit: Option<String>,

    // Sums
    pub quantity: f64,
    pub unit_price: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub cash_received: f64,
    pub remaining_balance: f64,
    pub payment_status: String,

    // Info fields
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SalesRecord {
    fn from(m: Model) -> Self {
        SalesRecord {
            id: m.id,
            invoice_no: m.invoice_no,
            status: m.status,
            date: m.date,
            term_days: m.term_days,
            due_date: m.due_date,
            customer: m.customer,
            product: m.product,
            revenue_category: m.revenue_category,
            revenue_type: m.revenue_type,
            unit: m.unit,
            quantity: m.quantity,
            unit_price: m.unit_price,
            discount_amount: m.discount_amount,
            total_amount: m.total_amount,
            cash_received: m.cash_received,
            remaining_balance: m.remaining_balance,
            payment_status: m.payment_status,
            description: m.description,
            notes: m.notes,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn insert_entry(record: &SalesRecord) -> Result<()> {
    let active = ActiveModel {
        id: Set(record.id.clone()),
        invoice_no: Set(record.invoice_no.clone()),
        status: Set(record.status.clone()),
        date: Set(record.date.clone()),
        term_days: Set(record.term_days),
        due_date: Set(record.due_date.clone()),
        customer: Set(record.customer.clone()),
        product: Set(record.product.clone()),
        revenue_category: Set(record.revenue_category.clone()),
        revenue_type: Set(record.revenue_type.clone()),
        unit: Set(record.unit.clone()),
        quantity: Set(record.quantity),
        unit_price: Set(record.unit_price),
        discount_amount: Set(record.discount_amount),
        total_amount: Set(record.total_amount),
        cash_received: Set(record.cash_received),
        remaining_balance: Set(record.remaining_balance),
        payment_status: Set(record.payment_status.clone()),
        description: Set(record.description.clone()),
        notes: Set(record.notes.clone()),
    };

    Entity::insert(active).exec(conn()).await?;
    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<SalesRecord>> {
    let item = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(item.map(SalesRecord::from))
}

pub async fn delete_by_id(id: &str) -> Result<u64> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()).await?;
    Ok(result.rows_affected)
}

pub async fn count() -> Result<u64> {
    let total = Entity::find().count(conn()).await?;
    Ok(total)
}

/// Table filters as a query.
///
/// Dates compare on their first 10 characters, so a stored timestamp counts as
/// its calendar day. Substring matches use `LIKE`, which folds ASCII case only;
/// `SalesEntryListRequest::matches` follows the same rules in memory.
fn filtered_query(filter: &SalesEntryListRequest) -> Select<Entity> {
    let mut query = Entity::find();

    if let Some(from) = &filter.date_from {
        query = query.filter(Column::Date.gte(from.as_str()));
    }
    if let Some(to) = &filter.date_to {
        query = query.filter(Expr::cust_with_values(
            r#"substr("date", 1, 10) <= ?"#,
            [to.as_str()],
        ));
    }
    if let Some(customer) = &filter.customer {
        query = query.filter(Column::Customer.contains(customer.as_str()));
    }
    if let Some(product) = &filter.product {
        query = query.filter(Column::Product.contains(product.as_str()));
    }
    if let Some(category) = &filter.revenue_category {
        query = query.filter(Column::RevenueCategory.eq(category.as_str()));
    }
    if let Some(status) = &filter.payment_status {
        query = query.filter(Column::PaymentStatus.eq(status.as_str()));
    }
    query
}

/// List with table filters, newest first. `limit = None` returns every match.
pub async fn list_with_filters(
    filter: &SalesEntryListRequest,
    limit: Option<u64>,
) -> Result<Vec<SalesRecord>> {
    let mut query = filtered_query(filter).order_by_desc(Column::Date);
    if let Some(lim) = limit {
        query = query.limit(lim);
    }

    let items = query.all(conn()).await?;
    Ok(items.into_iter().map(SalesRecord::from).collect())
}

/// Number of rows passing the table filters, ignoring the limit
pub async fn count_with_filters(filter: &SalesEntryListRequest) -> Result<u64> {
    let total = filtered_query(filter).count(conn()).await?;
    Ok(total)
}
