//! Bootstrap schema of the reporting database.
//!
//! Source tables are filled by the ERP sync; this service only reads them.
//! Every statement is `IF NOT EXISTS`, so applying the schema on each start
//! is a no-op against an existing database.

use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Category id products are parked in until someone assigns a real one
pub const UNASSIGNED_CATEGORY_ID: i64 = 1006;

const TABLES: &[(&str, &str)] = &[
    (
        "tblProductBrand",
        r#"
        CREATE TABLE IF NOT EXISTS tblProductBrand (
            ID INTEGER PRIMARY KEY NOT NULL,
            Neto_Name TEXT NOT NULL
        );
        "#,
    ),
    (
        "tblProductSupplier",
        r#"
        CREATE TABLE IF NOT EXISTS tblProductSupplier (
            ID INTEGER PRIMARY KEY NOT NULL,
            SuppCode TEXT NOT NULL
        );
        "#,
    ),
    (
        "tblCategories",
        r#"
        CREATE TABLE IF NOT EXISTS tblCategories (
            Category_ID INTEGER PRIMARY KEY NOT NULL,
            CategoryName TEXT NOT NULL
        );
        "#,
    ),
    (
        "tblProductsMaster",
        r#"
        CREATE TABLE IF NOT EXISTS tblProductsMaster (
            SKU TEXT PRIMARY KEY NOT NULL,
            Title TEXT,
            Brand INTEGER,
            Category INTEGER,
            PrefSupp INTEGER,
            PackageType TEXT,
            Location TEXT,
            CostPrice REAL NOT NULL DEFAULT 0,
            MaxLevel INTEGER NOT NULL DEFAULT 0,
            FitRef TEXT
        );
        "#,
    ),
    (
        "tblProductStock",
        r#"
        CREATE TABLE IF NOT EXISTS tblProductStock (
            SKU TEXT NOT NULL,
            Warehouse TEXT NOT NULL,
            Qty INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (SKU, Warehouse)
        );
        "#,
    ),
    (
        "tblSales",
        r#"
        CREATE TABLE IF NOT EXISTS tblSales (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            SKU TEXT NOT NULL,
            SaleDate TEXT NOT NULL,
            Qty INTEGER NOT NULL DEFAULT 1
        );
        "#,
    ),
    (
        "tblEbayListings",
        r#"
        CREATE TABLE IF NOT EXISTS tblEbayListings (
            ItemID TEXT PRIMARY KEY NOT NULL,
            SKU TEXT NOT NULL
        );
        "#,
    ),
    (
        "tblChecklist",
        r#"
        CREATE TABLE IF NOT EXISTS tblChecklist (
            SKU TEXT PRIMARY KEY NOT NULL,
            GPT_Done INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "tblProductCrossReferences",
        r#"
        CREATE TABLE IF NOT EXISTS tblProductCrossReferences (
            GSS_SKU TEXT NOT NULL,
            Supplier INTEGER NOT NULL,
            Supplier_SKU TEXT NOT NULL
        );
        "#,
    ),
    (
        "tblScrapedData",
        r#"
        CREATE TABLE IF NOT EXISTS tblScrapedData (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Scraped_Supplier_SKU TEXT NOT NULL,
            Scraped_Brand TEXT,
            Scraped_Supplier TEXT
        );
        "#,
    ),
    (
        "tblFitment",
        r#"
        CREATE TABLE IF NOT EXISTS tblFitment (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            SKU TEXT NOT NULL,
            ktype TEXT NOT NULL
        );
        "#,
    ),
    (
        "tblVML",
        r#"
        CREATE TABLE IF NOT EXISTS tblVML (
            ktype TEXT NOT NULL,
            EPID TEXT NOT NULL,
            Complete INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (ktype, EPID)
        );
        "#,
    ),
];

/// Reporting views. Order matters: later views select from earlier ones.
const VIEWS: &[(&str, &str)] = &[
    (
        "vw_ProductStock",
        r#"
        CREATE VIEW IF NOT EXISTS vw_ProductStock AS
        SELECT SKU, SUM(Qty) AS TotalStock
        FROM tblProductStock
        GROUP BY SKU;
        "#,
    ),
    (
        "vw_DeadStock",
        r#"
        CREATE VIEW IF NOT EXISTS vw_DeadStock AS
        WITH last_sale AS (
            SELECT SKU, MAX(SaleDate) AS LastSaleDate
            FROM tblSales
            GROUP BY SKU
        ),
        stock AS (
            SELECT
                pm.SKU,
                pm.Title,
                pb.Neto_Name AS Brand,
                c.CategoryName AS Category,
                pm.Location,
                qoh.TotalStock AS Stock,
                ROUND(qoh.TotalStock * pm.CostPrice, 2) AS StockValue,
                ls.LastSaleDate,
                CAST(julianday('now') - julianday(ls.LastSaleDate) AS INTEGER) AS DaysSinceSale
            FROM tblProductsMaster pm
            INNER JOIN vw_ProductStock qoh ON qoh.SKU = pm.SKU
            LEFT JOIN tblProductBrand pb ON pb.ID = pm.Brand
            LEFT JOIN tblCategories c ON c.Category_ID = pm.Category
            LEFT JOIN last_sale ls ON ls.SKU = pm.SKU
            WHERE qoh.TotalStock >= 1
        )
        SELECT
            SKU, Title, Brand, Category, Location, Stock, StockValue,
            LastSaleDate, DaysSinceSale,
            CASE
                WHEN LastSaleDate IS NULL THEN 'Never Sold'
                WHEN DaysSinceSale >= 3650 THEN '10+ Years'
                WHEN DaysSinceSale >= 2555 THEN '7-10 Years'
                WHEN DaysSinceSale >= 1825 THEN '5-7 Years'
                ELSE '3-5 Years'
            END AS AgeBracket
        FROM stock
        WHERE LastSaleDate IS NULL OR DaysSinceSale >= 1095;
        "#,
    ),
    (
        "vw_DeadStockUnlisted",
        r#"
        CREATE VIEW IF NOT EXISTS vw_DeadStockUnlisted AS
        SELECT d.*
        FROM vw_DeadStock d
        WHERE NOT EXISTS (SELECT 1 FROM tblEbayListings e WHERE e.SKU = d.SKU);
        "#,
    ),
    (
        "vw_OverstockedItems",
        r#"
        CREATE VIEW IF NOT EXISTS vw_OverstockedItems AS
        SELECT
            pm.SKU,
            pm.Title,
            pb.Neto_Name AS Brand,
            c.CategoryName AS Category,
            pm.Location,
            qoh.TotalStock AS CurrentStock,
            pm.MaxLevel,
            qoh.TotalStock - pm.MaxLevel AS OverstockedBy,
            ROUND(qoh.TotalStock * pm.CostPrice, 2) AS StockValue
        FROM tblProductsMaster pm
        INNER JOIN vw_ProductStock qoh ON qoh.SKU = pm.SKU
        LEFT JOIN tblProductBrand pb ON pb.ID = pm.Brand
        LEFT JOIN tblCategories c ON c.Category_ID = pm.Category
        WHERE pm.MaxLevel > 0 AND qoh.TotalStock > pm.MaxLevel;
        "#,
    ),
    (
        "vw_FitmentMissingVML",
        r#"
        CREATE VIEW IF NOT EXISTS vw_FitmentMissingVML AS
        SELECT f.SKU, f.ktype
        FROM tblFitment f
        WHERE NOT EXISTS (SELECT 1 FROM tblVML v WHERE v.ktype = f.ktype);
        "#,
    ),
    (
        "vw_VMLIncomplete",
        r#"
        CREATE VIEW IF NOT EXISTS vw_VMLIncomplete AS
        SELECT ktype, COUNT(*) AS EPIDCount
        FROM tblVML
        WHERE Complete = 0
        GROUP BY ktype;
        "#,
    ),
    (
        "vw_ProductsNoFitRef",
        r#"
        CREATE VIEW IF NOT EXISTS vw_ProductsNoFitRef AS
        SELECT SKU, Title, Brand, Category
        FROM tblProductsMaster
        WHERE FitRef IS NULL OR TRIM(FitRef) = '';
        "#,
    ),
    (
        "vw_VMLFitmentSummary",
        r#"
        CREATE VIEW IF NOT EXISTS vw_VMLFitmentSummary AS
        SELECT
            (SELECT COUNT(*) FROM vw_FitmentMissingVML) AS FitmentMissingVML,
            (SELECT COUNT(*) FROM vw_ProductsNoFitRef) AS ProductsNoFitRef,
            (SELECT COUNT(*) FROM vw_VMLIncomplete) AS IncompleteKtypes,
            (SELECT COALESCE(SUM(EPIDCount), 0) FROM vw_VMLIncomplete) AS TotalIncompleteEPIDs;
        "#,
    ),
];

pub async fn apply(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, sql) in TABLES.iter().chain(VIEWS.iter()) {
        tracing::debug!("Ensuring {}", name);
        conn.execute_unprepared(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create {}: {}", name, e))?;
    }
    tracing::info!(
        "Reporting schema ready ({} tables, {} views)",
        TABLES.len(),
        VIEWS.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use sea_orm::{DatabaseBackend, Statement};

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        apply(&conn).await.unwrap();

        let rows = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'view'".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(rows.len(), VIEWS.len());
    }
}
