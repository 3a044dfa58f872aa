//! Report data providers: one fixed, parameterless query per endpoint.

use contracts::reports::ProviderShape;
use once_cell::sync::Lazy;

use crate::shared::data::schema::UNASSIGNED_CATEGORY_ID;

#[derive(Debug, Clone)]
pub struct Provider {
    pub path: String,
    pub shape: ProviderShape,
    pub sql: String,
}

impl Provider {
    fn list(path: &str, sql: &str) -> Self {
        Self {
            path: path.to_string(),
            shape: ProviderShape::List,
            sql: sql.to_string(),
        }
    }

    fn single(path: &str, sql: &str) -> Self {
        Self {
            path: path.to_string(),
            shape: ProviderShape::Single,
            sql: sql.to_string(),
        }
    }
}

pub static PROVIDERS: Lazy<Vec<Provider>> = Lazy::new(|| {
    let mut providers = vec![Provider::list(
        "/api/brand-stock",
        r#"
        SELECT
            MIN(sd.ID) AS ID,
            sd.Scraped_Brand AS Brand,
            MIN(sd.Scraped_Supplier) AS Supplier,
            COUNT(pm.SKU) AS SKU_Count,
            SUM(qoh.TotalStock) AS Total_QOH
        FROM vw_ProductStock qoh
        INNER JOIN tblProductsMaster pm ON qoh.SKU = pm.SKU
        INNER JOIN tblProductCrossReferences pcr
            ON pm.PrefSupp = pcr.Supplier AND pm.SKU = pcr.GSS_SKU
        INNER JOIN tblScrapedData sd ON pcr.Supplier_SKU = sd.Scraped_Supplier_SKU
        WHERE qoh.TotalStock >= 1
        GROUP BY sd.Scraped_Brand
        ORDER BY COUNT(pm.SKU) DESC
        "#,
    )];

    providers.extend(dead_stock("dead-stock", "vw_DeadStock"));
    providers.extend(dead_stock("dead-stock-unlisted", "vw_DeadStockUnlisted"));
    providers.extend(overstocked());
    providers.extend(product_gaps());
    providers.extend(vml_fitment());
    providers
});

pub fn find(path: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.path == path)
}

fn dead_stock(slug: &str, view: &str) -> Vec<Provider> {
    let breakdown = |key: &str, group_expr: &str, order: &str| {
        format!(
            r#"
            SELECT
                {group_expr} AS {key},
                COUNT(*) AS SKUCount,
                SUM(StockValue) AS TotalValue,
                SUM(Stock) AS TotalUnits
            FROM {view}
            GROUP BY {group_expr}
            ORDER BY {order}
            "#
        )
    };

    vec![
        Provider::single(
            &format!("/api/{slug}/summary"),
            &format!(
                r#"
                SELECT
                    COUNT(*) AS TotalSKUs,
                    COALESCE(SUM(StockValue), 0) AS TotalValue,
                    COALESCE(SUM(Stock), 0) AS TotalUnits,
                    COALESCE(SUM(CASE WHEN LastSaleDate IS NULL THEN 1 ELSE 0 END), 0) AS NeverSold
                FROM {view}
                "#
            ),
        ),
        Provider::list(
            &format!("/api/{slug}/by-brand"),
            &breakdown("Brand", "Brand", "SUM(StockValue) DESC"),
        ),
        Provider::list(
            &format!("/api/{slug}/by-category"),
            &breakdown(
                "Category",
                "COALESCE(Category, 'Uncategorised')",
                "SUM(StockValue) DESC",
            ),
        ),
        Provider::list(
            &format!("/api/{slug}/by-age"),
            &breakdown(
                "AgeBracket",
                "AgeBracket",
                r#"CASE AgeBracket
                    WHEN '3-5 Years' THEN 1
                    WHEN '5-7 Years' THEN 2
                    WHEN '7-10 Years' THEN 3
                    WHEN '10+ Years' THEN 4
                    WHEN 'Never Sold' THEN 5
                    ELSE 6
                END"#,
            ),
        ),
        Provider::list(
            &format!("/api/{slug}/list"),
            &format!(
                r#"
                SELECT
                    SKU, Title, Brand, Category, Location, Stock, StockValue,
                    LastSaleDate, DaysSinceSale, AgeBracket
                FROM {view}
                ORDER BY StockValue DESC
                "#
            ),
        ),
    ]
}

fn overstocked() -> Vec<Provider> {
    let breakdown = |key: &str, group_expr: &str| {
        format!(
            r#"
            SELECT
                {group_expr} AS {key},
                COUNT(*) AS SKUCount,
                SUM(StockValue) AS TotalValue,
                SUM(OverstockedBy) AS TotalOverstock
            FROM vw_OverstockedItems
            GROUP BY {group_expr}
            ORDER BY SUM(StockValue) DESC
            "#
        )
    };

    vec![
        Provider::single(
            "/api/overstocked/summary",
            r#"
            SELECT
                COUNT(*) AS TotalSKUs,
                COALESCE(SUM(StockValue), 0) AS TotalValue,
                COALESCE(SUM(CurrentStock), 0) AS TotalUnits,
                COALESCE(SUM(OverstockedBy), 0) AS TotalOverstock
            FROM vw_OverstockedItems
            "#,
        ),
        Provider::list("/api/overstocked/by-brand", &breakdown("Brand", "Brand")),
        Provider::list(
            "/api/overstocked/by-category",
            &breakdown("Category", "COALESCE(Category, 'Uncategorised')"),
        ),
        Provider::list(
            "/api/overstocked/list",
            r#"
            SELECT
                SKU, Title, Brand, Category, Location,
                CurrentStock, MaxLevel, OverstockedBy, StockValue
            FROM vw_OverstockedItems
            ORDER BY OverstockedBy DESC
            "#,
        ),
    ]
}

/// In-stock products missing one attribute, and GPT-enriched products still missing one
fn product_gaps() -> Vec<Provider> {
    let in_stock = |condition: &str| {
        format!(
            r#"
            SELECT
                pm.SKU,
                pm.Title,
                pb.Neto_Name AS Brand,
                ps.SuppCode AS Supplier,
                qoh.TotalStock AS Stock
            FROM tblProductsMaster pm
            INNER JOIN tblProductSupplier ps ON ps.ID = pm.PrefSupp
            INNER JOIN tblProductBrand pb ON pb.ID = pm.Brand
            INNER JOIN vw_ProductStock qoh ON qoh.SKU = pm.SKU
            WHERE {condition} AND qoh.TotalStock >= 1
            ORDER BY qoh.TotalStock DESC
            "#
        )
    };
    let gpt_done = |condition: &str| {
        format!(
            r#"
            SELECT
                c.SKU,
                p.Title AS Description
            FROM tblChecklist c
            INNER JOIN tblProductsMaster p ON c.SKU = p.SKU
            WHERE c.GPT_Done = 1 AND {condition}
            ORDER BY c.SKU
            "#
        )
    };
    let no_category = format!("pm.Category = {}", UNASSIGNED_CATEGORY_ID);
    let no_package = "(pm.PackageType IS NULL OR TRIM(pm.PackageType) = '')";

    vec![
        Provider::list("/api/no-category", &in_stock(&no_category)),
        Provider::list("/api/tba-brand", &in_stock("pb.Neto_Name = 'TBA'")),
        Provider::list("/api/no-package", &in_stock(no_package)),
        Provider::list(
            "/api/gpt-no-package",
            &gpt_done(&no_package.replace("pm.", "p.")),
        ),
        Provider::list(
            "/api/gpt-no-category",
            &gpt_done(&format!("p.Category = {}", UNASSIGNED_CATEGORY_ID)),
        ),
    ]
}

fn vml_fitment() -> Vec<Provider> {
    vec![
        Provider::single(
            "/api/vml-fitment/summary",
            "SELECT * FROM vw_VMLFitmentSummary",
        ),
        Provider::list(
            "/api/vml-fitment/fitment-missing-vml",
            r#"
            SELECT
                ktype,
                COUNT(*) AS FitmentRecords
            FROM vw_FitmentMissingVML
            GROUP BY ktype
            ORDER BY FitmentRecords DESC
            "#,
        ),
        Provider::list(
            "/api/vml-fitment/vml-incomplete",
            r#"
            SELECT
                ktype,
                EPIDCount
            FROM vw_VMLIncomplete
            ORDER BY EPIDCount DESC
            "#,
        ),
        Provider::list(
            "/api/vml-fitment/products-no-fitref",
            r#"
            SELECT
                p.SKU,
                p.Title,
                b.Neto_Name AS BrandName,
                c.CategoryName
            FROM vw_ProductsNoFitRef p
            LEFT JOIN tblProductBrand b ON b.ID = p.Brand
            LEFT JOIN tblCategories c ON c.Category_ID = p.Category
            ORDER BY p.SKU
            "#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::repository::{DatabaseRowSource, RowSource};
    use crate::shared::data::db::connect_in_memory;
    use contracts::reports::catalog;
    use std::collections::HashSet;

    #[test]
    fn test_every_catalog_request_has_a_provider() {
        for def in catalog::all().unwrap() {
            for request in def.requests() {
                let provider = find(&request.endpoint)
                    .unwrap_or_else(|| panic!("no provider for {}", request.endpoint));
                assert_eq!(provider.shape, request.shape, "{}", request.endpoint);
            }
        }
    }

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<&str> = PROVIDERS.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths.len(), PROVIDERS.len());
    }

    #[tokio::test]
    async fn test_every_query_runs_against_bootstrap_schema() {
        let source = DatabaseRowSource::new(connect_in_memory().await.unwrap());
        for provider in PROVIDERS.iter() {
            let rows = source.fetch_rows(&provider.sql).await;
            assert!(rows.is_ok(), "{}: {:?}", provider.path, rows.err());
        }
    }
}
