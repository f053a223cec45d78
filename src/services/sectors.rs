//! Sector Normalizer
//!
//! Maps each source's sector vocabulary onto one two-level taxonomy
//! (`sector` / `subsector`). Per family the raw fields are tried from finest
//! to coarsest until a lookup table hits; nothing matching degrades to
//! `("Other", "Other")`, never to an error.
//!
//! The tables are closed, case-sensitive sets over the vocabulary exactly as
//! each source emits it. They are maintained by hand against the live
//! sources, not inferred.

use crate::models::MarketFamily;

/// Unified two-level classification of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSector {
    pub sector: String,
    pub subsector: String,
}

impl NormalizedSector {
    fn new(sector: &str, subsector: &str) -> Self {
        Self {
            sector: sector.to_string(),
            subsector: subsector.to_string(),
        }
    }
}

/// Normalize up to three raw classification strings from one source.
///
/// `supersector` is only populated by Euronext (ICB). The `"SOCIMI"` literal
/// appearing in any field wins over every table for every family.
pub fn normalize(
    family: MarketFamily,
    sector: Option<&str>,
    subsector: Option<&str>,
    supersector: Option<&str>,
) -> NormalizedSector {
    let fields = [sector, subsector, supersector];
    if fields
        .iter()
        .flatten()
        .any(|raw| raw.contains("SOCIMI"))
    {
        return NormalizedSector::new("Real Estate", "SOCIMI");
    }

    let hit = match family {
        MarketFamily::Bme => subsector
            .and_then(bme_subsector)
            .or_else(|| sector.and_then(bme_sector)),
        MarketFamily::Euronext => subsector
            .and_then(icb_subsector)
            .or_else(|| sector.and_then(icb_sector))
            .or_else(|| supersector.and_then(icb_supersector)),
        MarketFamily::Portfolio => sector
            .and_then(portfolio_sector)
            .or_else(|| subsector.and_then(portfolio_sector)),
    };

    match hit {
        Some((s, sub)) => NormalizedSector::new(s, sub),
        None => NormalizedSector::new("Other", "Other"),
    }
}

/// BME subsector vocabulary, as printed on the listing pages.
fn bme_subsector(raw: &str) -> Option<(&'static str, &'static str)> {
    let hit = match raw.trim() {
        "Bancos y Cajas de Ahorro" => ("Banks", "Banks"),
        "Seguros" => ("Insurance", "Insurance"),
        "Cartera y Holding" => ("Financial Services", "Holding Companies"),
        "Servicios de Inversión" => ("Financial Services", "Investment Services"),
        "Inmobiliarias y Otros" => ("Real Estate", "Real Estate Holding & Development"),
        "SOCIMI" => ("Real Estate", "SOCIMI"),
        "Petróleo" => ("Energy", "Oil & Gas"),
        "Electricidad y Gas" => ("Utilities", "Electricity & Gas"),
        "Energías Renovables" => ("Utilities", "Renewable Energy"),
        "Agua y Otros" => ("Utilities", "Water & Other"),
        "Mineral, Metales y Transformación" => ("Basic Materials", "Metals & Mining"),
        "Industria Química" => ("Basic Materials", "Chemicals"),
        "Papel y Artes Gráficas" => ("Basic Materials", "Paper & Printing"),
        "Fabric. y Montaje Bienes de Equipo" => ("Industrials", "Capital Goods"),
        "Construcción" => ("Industrials", "Construction"),
        "Materiales de Construcción" => ("Industrials", "Building Materials"),
        "Ingeniería y Otros" => ("Industrials", "Engineering"),
        "Aerospacial" => ("Industrials", "Aerospace & Defense"),
        "Autopistas y Aparcamientos" => ("Industrials", "Infrastructure"),
        "Alimentación y Bebidas" => ("Consumer Goods", "Food & Beverage"),
        "Textil, Vestido y Calzado" => ("Consumer Goods", "Textiles & Apparel"),
        "Otros Bienes de Consumo" => ("Consumer Goods", "Other Consumer Goods"),
        "Productos farmacéuticos y Biotecnología" => {
            ("Healthcare", "Pharmaceuticals & Biotech")
        }
        "Ocio, Turismo y Hostelería" => ("Consumer Services", "Leisure & Hotels"),
        "Comercio" => ("Consumer Services", "Retail"),
        "Medios de Comunicación y Publicidad" => ("Consumer Services", "Media & Advertising"),
        "Transporte y Distribución" => ("Consumer Services", "Transport & Distribution"),
        "Telecomunicaciones y Otros" => ("Telecommunications", "Telecommunications"),
        "Electrónica y Software" => ("Technology", "Software & Electronics"),
        _ => return None,
    };
    Some(hit)
}

/// BME top-level sector vocabulary.
fn bme_sector(raw: &str) -> Option<(&'static str, &'static str)> {
    let hit = match raw.trim() {
        "Petróleo y Energía" => ("Energy", "Other"),
        "Mat.Basicos, Industria y Construcción" => ("Industrials", "Other"),
        "Bienes de Consumo" => ("Consumer Goods", "Other"),
        "Servicios de Consumo" => ("Consumer Services", "Other"),
        "Servicios Financieros e Inmobiliarios" => ("Financial Services", "Other"),
        "Servicios Financieros" => ("Financial Services", "Other"),
        "Sector Inmobiliario" => ("Real Estate", "Other"),
        "Tecnología y Telecomunicaciones" => ("Technology", "Other"),
        _ => return None,
    };
    Some(hit)
}

/// ICB subsector vocabulary (Euronext), finest level.
fn icb_subsector(raw: &str) -> Option<(&'static str, &'static str)> {
    let hit = match raw.trim() {
        "Banks" => ("Banks", "Banks"),
        "Asset Managers" => ("Financial Services", "Asset Managers"),
        "Investment Services" => ("Financial Services", "Investment Services"),
        "Specialty Finance" => ("Financial Services", "Specialty Finance"),
        "Consumer Lending" => ("Financial Services", "Consumer Lending"),
        "Mortgage Finance" => ("Financial Services", "Mortgage Finance"),
        "Life Insurance" => ("Insurance", "Life Insurance"),
        "Full Line Insurance" => ("Insurance", "Full Line Insurance"),
        "Property & Casualty Insurance" => ("Insurance", "Property & Casualty"),
        "Reinsurance" => ("Insurance", "Reinsurance"),
        "Diversified REITs" => ("Real Estate", "Diversified REITs"),
        "Retail REITs" => ("Real Estate", "Retail REITs"),
        "Office REITs" => ("Real Estate", "Office REITs"),
        "Residential REITs" => ("Real Estate", "Residential REITs"),
        "Industrial REITs" => ("Real Estate", "Industrial REITs"),
        "Real Estate Holding and Development" => {
            ("Real Estate", "Real Estate Holding & Development")
        }
        "Real Estate Services" => ("Real Estate", "Real Estate Services"),
        "Software" => ("Technology", "Software"),
        "Computer Services" => ("Technology", "Computer Services"),
        "Internet" => ("Technology", "Internet"),
        "Semiconductors" => ("Technology", "Semiconductors"),
        "Computer Hardware" => ("Technology", "Computer Hardware"),
        "Electronic Equipment" => ("Technology", "Electronic Equipment"),
        "Fixed Line Telecommunications" => ("Telecommunications", "Fixed Line"),
        "Mobile Telecommunications" => ("Telecommunications", "Mobile"),
        "Pharmaceuticals" => ("Healthcare", "Pharmaceuticals"),
        "Biotechnology" => ("Healthcare", "Biotechnology"),
        "Medical Equipment" => ("Healthcare", "Medical Equipment"),
        "Medical Supplies" => ("Healthcare", "Medical Supplies"),
        "Health Care Providers" => ("Healthcare", "Health Care Providers"),
        "Oil & Gas Producers" => ("Energy", "Oil & Gas Producers"),
        "Oil Equipment & Services" => ("Energy", "Oil Equipment & Services"),
        "Conventional Electricity" => ("Utilities", "Electricity"),
        "Alternative Electricity" => ("Utilities", "Renewable Energy"),
        "Renewable Energy Equipment" => ("Utilities", "Renewable Energy"),
        "Gas Distribution" => ("Utilities", "Gas Distribution"),
        "Water" => ("Utilities", "Water"),
        "Food Products" => ("Consumer Goods", "Food Products"),
        "Beverages" => ("Consumer Goods", "Beverages"),
        "Brewers" => ("Consumer Goods", "Beverages"),
        "Distillers & Vintners" => ("Consumer Goods", "Beverages"),
        "Clothing & Accessories" => ("Consumer Goods", "Clothing & Accessories"),
        "Footwear" => ("Consumer Goods", "Clothing & Accessories"),
        "Personal Products" => ("Consumer Goods", "Personal Products"),
        "Durable Household Products" => ("Consumer Goods", "Household Products"),
        "Nondurable Household Products" => ("Consumer Goods", "Household Products"),
        "Tobacco" => ("Consumer Goods", "Tobacco"),
        "Food Retailers & Wholesalers" => ("Consumer Services", "Food Retail"),
        "Broadline Retailers" => ("Consumer Services", "Retail"),
        "Apparel Retailers" => ("Consumer Services", "Retail"),
        "Specialty Retailers" => ("Consumer Services", "Retail"),
        "Media Agencies" => ("Consumer Services", "Media"),
        "Publishing" => ("Consumer Services", "Media"),
        "Broadcasting & Entertainment" => ("Consumer Services", "Media"),
        "Travel & Tourism" => ("Consumer Services", "Travel & Leisure"),
        "Hotels" => ("Consumer Services", "Travel & Leisure"),
        "Restaurants & Bars" => ("Consumer Services", "Travel & Leisure"),
        "Gambling" => ("Consumer Services", "Travel & Leisure"),
        "Airlines" => ("Consumer Services", "Transport"),
        "Marine Transportation" => ("Consumer Services", "Transport"),
        "Railroads" => ("Consumer Services", "Transport"),
        "Trucking" => ("Consumer Services", "Transport"),
        "Aerospace" => ("Industrials", "Aerospace & Defense"),
        "Defense" => ("Industrials", "Aerospace & Defense"),
        "Building Materials & Fixtures" => ("Industrials", "Building Materials"),
        "Heavy Construction" => ("Industrials", "Construction"),
        "Industrial Machinery" => ("Industrials", "Industrial Machinery"),
        "Commercial Vehicles & Trucks" => ("Industrials", "Commercial Vehicles"),
        "Electrical Components & Equipment" => ("Industrials", "Electrical Components"),
        "Business Support Services" => ("Industrials", "Business Support"),
        "Industrial Suppliers" => ("Industrials", "Industrial Suppliers"),
        "Waste & Disposal Services" => ("Industrials", "Waste & Disposal"),
        "Commodity Chemicals" => ("Basic Materials", "Chemicals"),
        "Specialty Chemicals" => ("Basic Materials", "Chemicals"),
        "Gold Mining" => ("Basic Materials", "Metals & Mining"),
        "General Mining" => ("Basic Materials", "Metals & Mining"),
        "Iron & Steel" => ("Basic Materials", "Metals & Mining"),
        "Aluminum" => ("Basic Materials", "Metals & Mining"),
        "Nonferrous Metals" => ("Basic Materials", "Metals & Mining"),
        "Forestry" => ("Basic Materials", "Paper & Printing"),
        "Paper" => ("Basic Materials", "Paper & Printing"),
        _ => return None,
    };
    Some(hit)
}

/// ICB sector vocabulary (Euronext), middle level.
fn icb_sector(raw: &str) -> Option<(&'static str, &'static str)> {
    let hit = match raw.trim() {
        "Banks" => ("Banks", "Banks"),
        "Financial Services" => ("Financial Services", "Other"),
        "Life Insurance" => ("Insurance", "Life Insurance"),
        "Nonlife Insurance" => ("Insurance", "Other"),
        "Real Estate Investment Trusts" => ("Real Estate", "REITs"),
        "Real Estate Investment & Services" => ("Real Estate", "Other"),
        "Software & Computer Services" => ("Technology", "Software"),
        "Technology Hardware & Equipment" => ("Technology", "Hardware"),
        "Telecommunications" => ("Telecommunications", "Telecommunications"),
        "Pharmaceuticals & Biotechnology" => ("Healthcare", "Pharmaceuticals & Biotech"),
        "Health Care Equipment & Services" => ("Healthcare", "Equipment & Services"),
        "Oil & Gas Producers" => ("Energy", "Oil & Gas Producers"),
        "Oil, Gas and Coal" => ("Energy", "Other"),
        "Electricity" => ("Utilities", "Electricity"),
        "Gas, Water & Multiutilities" => ("Utilities", "Other"),
        "Food Producers" => ("Consumer Goods", "Food Products"),
        "Beverages" => ("Consumer Goods", "Beverages"),
        "Household Goods & Home Construction" => ("Consumer Goods", "Household Products"),
        "Personal Goods" => ("Consumer Goods", "Personal Products"),
        "Leisure Goods" => ("Consumer Goods", "Leisure Goods"),
        "Automobiles & Parts" => ("Consumer Goods", "Automobiles & Parts"),
        "Tobacco" => ("Consumer Goods", "Tobacco"),
        "Food & Drug Retailers" => ("Consumer Services", "Food Retail"),
        "General Retailers" => ("Consumer Services", "Retail"),
        "Media" => ("Consumer Services", "Media"),
        "Travel & Leisure" => ("Consumer Services", "Travel & Leisure"),
        "Construction & Materials" => ("Industrials", "Construction"),
        "Aerospace & Defence" => ("Industrials", "Aerospace & Defense"),
        "General Industrials" => ("Industrials", "Other"),
        "Industrial Engineering" => ("Industrials", "Industrial Machinery"),
        "Industrial Transportation" => ("Industrials", "Transport"),
        "Support Services" => ("Industrials", "Business Support"),
        "Chemicals" => ("Basic Materials", "Chemicals"),
        "Industrial Metals & Mining" => ("Basic Materials", "Metals & Mining"),
        "Mining" => ("Basic Materials", "Metals & Mining"),
        "Forestry & Paper" => ("Basic Materials", "Paper & Printing"),
        _ => return None,
    };
    Some(hit)
}

/// ICB supersector vocabulary (Euronext), coarsest level.
fn icb_supersector(raw: &str) -> Option<(&'static str, &'static str)> {
    let hit = match raw.trim() {
        "Banks" => ("Banks", "Other"),
        "Financial Services" => ("Financial Services", "Other"),
        "Insurance" => ("Insurance", "Other"),
        "Real Estate" => ("Real Estate", "Other"),
        "Technology" => ("Technology", "Other"),
        "Telecommunications" => ("Telecommunications", "Other"),
        "Health Care" => ("Healthcare", "Other"),
        "Energy" => ("Energy", "Other"),
        "Utilities" => ("Utilities", "Other"),
        "Consumer Products and Services" => ("Consumer Goods", "Other"),
        "Food, Beverage and Tobacco" => ("Consumer Goods", "Other"),
        "Automobiles and Parts" => ("Consumer Goods", "Other"),
        "Retail" => ("Consumer Services", "Other"),
        "Travel and Leisure" => ("Consumer Services", "Other"),
        "Media" => ("Consumer Services", "Other"),
        "Industrial Goods and Services" => ("Industrials", "Other"),
        "Construction and Materials" => ("Industrials", "Other"),
        "Basic Resources" => ("Basic Materials", "Other"),
        "Chemicals" => ("Basic Materials", "Other"),
        _ => return None,
    };
    Some(hit)
}

/// Portfolio exchange vocabulary — a single small, flat set.
fn portfolio_sector(raw: &str) -> Option<(&'static str, &'static str)> {
    let hit = match raw.trim() {
        "Real Estate" => ("Real Estate", "Real Estate Holding & Development"),
        "Technology" => ("Technology", "Software"),
        "Financial Services" => ("Financial Services", "Other"),
        "Renewable Energy" => ("Utilities", "Renewable Energy"),
        "Healthcare" => ("Healthcare", "Other"),
        "Consumer" => ("Consumer Goods", "Other"),
        "Industrial" => ("Industrials", "Other"),
        "Sports" => ("Consumer Services", "Leisure & Hotels"),
        "Agriculture" => ("Consumer Goods", "Food & Beverage"),
        _ => return None,
    };
    Some(hit)
}
