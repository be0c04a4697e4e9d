//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Geography Reference Tables
//!
//! Canonical country → continent table and the ordered alias table used to
//! collapse free-text location strings into a small, fixed set of buckets.
//!
//! The country table is bundled as a `;`-delimited file with the columns
//! `Nom français;Continent`. Loading normalizes it:
//!
//! - names are lowercased and any parenthesised suffix is dropped
//! - every `Amérique …` label collapses into [`ZiContinent::Amerique`]
//! - repeated names keep their first position
//! - the domestic country is never placed in a bucket
//!
//! Country matching is substring based and first-match-wins, so the bundled
//! table lists a longer name before any shorter name it contains
//! (`république démocratique du congo` before `congo`).

use std::collections::HashSet;
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};
use crate::operators::transform::normalize_text;

/// Reference market. Locations mentioning it collapse to it and receive no
/// continent.
pub const DOMESTIC_COUNTRY: &str = "france";

/// Countries moved into [`ZiContinent::Voisin`] by the border split.
pub const BORDER_COUNTRIES: &[&str] = &[
    "espagne",
    "italie",
    "belgique",
    "luxembourg",
    "allemagne",
    "suisse",
    "andorre",
    "royaume-uni",
];

const BUILTIN_COUNTRY_TABLE: &str = include_str!("../../data/pays_continents.csv");

/// Continent bucket assigned to a resolved location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZiContinent {
    #[serde(rename = "europe")]
    Europe,
    #[serde(rename = "amérique")]
    Amerique,
    #[serde(rename = "afrique")]
    Afrique,
    #[serde(rename = "asie")]
    Asie,
    #[serde(rename = "océanie")]
    Oceanie,
    #[serde(rename = "voisin")]
    Voisin,
    #[serde(rename = "inconnue")]
    Inconnue,
}

impl ZiContinent {
    pub const ALL: [ZiContinent; 7] = [
        ZiContinent::Europe,
        ZiContinent::Amerique,
        ZiContinent::Afrique,
        ZiContinent::Asie,
        ZiContinent::Oceanie,
        ZiContinent::Voisin,
        ZiContinent::Inconnue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZiContinent::Europe => "europe",
            ZiContinent::Amerique => "amérique",
            ZiContinent::Afrique => "afrique",
            ZiContinent::Asie => "asie",
            ZiContinent::Oceanie => "océanie",
            ZiContinent::Voisin => "voisin",
            ZiContinent::Inconnue => "inconnue",
        }
    }

    /// Parses a continent label as written in the country table.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.starts_with("amérique") || label.starts_with("amerique") {
            return Some(ZiContinent::Amerique);
        }
        match label.as_str() {
            "europe" => Some(ZiContinent::Europe),
            "afrique" => Some(ZiContinent::Afrique),
            "asie" => Some(ZiContinent::Asie),
            "océanie" | "oceanie" => Some(ZiContinent::Oceanie),
            "voisin" => Some(ZiContinent::Voisin),
            "inconnue" => Some(ZiContinent::Inconnue),
            _ => None,
        }
    }
}

impl fmt::Display for ZiContinent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered substring → canonical country overrides.
///
/// Entry order is significant: lookup stops at the first key contained in
/// the value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiAliasTable {
    version: u32,
    entries: Vec<(String, String)>,
}

impl ZiAliasTable {
    pub fn new(entries: Vec<(String, String)>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::with_capacity(entries.len());
        for (key, country) in entries {
            let key = normalize_text(Some(key.trim())).unwrap_or_default();
            let country = normalize_text(Some(country.trim())).unwrap_or_default();
            if key.is_empty() || country.is_empty() {
                return Err(ZiError::validation(
                    "alias entries require a non-empty key and country",
                ));
            }
            if seen.insert(key.clone()) {
                cleaned.push((key, country));
            } else {
                log::debug!("alias key '{key}' shadowed by an earlier entry, skipped");
            }
        }
        Ok(Self {
            version: 1,
            entries: cleaned,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(
            ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Country mapped by the first key occurring in `value`.
    pub fn lookup(&self, value: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| value.contains(key.as_str()))
            .map(|(_, country)| country.as_str())
    }

    /// Next version with `extra` appended after the existing entries.
    pub fn extended(&self, extra: &[(&str, &str)]) -> Result<Self> {
        let mut entries = self.entries.clone();
        entries.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        let mut next = Self::new(entries)?;
        next.version = self.version + 1;
        Ok(next)
    }
}

/// One canonical country and its bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiCountry {
    pub name: String,
    pub continent: ZiContinent,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    #[serde(rename = "Nom français")]
    name: String,
    #[serde(rename = "Continent")]
    continent: String,
}

/// Country table, alias table and domestic market, read-only once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiGeoTables {
    countries: Vec<ZiCountry>,
    aliases: ZiAliasTable,
    domestic: String,
    border_bucket: bool,
}

impl ZiGeoTables {
    pub fn builtin() -> Result<Self> {
        Self::from_csv_reader(BUILTIN_COUNTRY_TABLE.as_bytes(), ZiAliasTable::builtin()?)
    }

    /// Loads a `Nom français;Continent` table.
    pub fn from_csv_reader<R: Read>(reader: R, aliases: ZiAliasTable) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut seen = HashSet::new();
        let mut countries = Vec::new();
        for row in csv_reader.deserialize::<CountryRow>() {
            let row = row?;
            let name = clean_country_name(&row.name);
            if name.is_empty() || name == DOMESTIC_COUNTRY {
                continue;
            }
            let continent = ZiContinent::from_label(&row.continent).ok_or_else(|| {
                ZiError::schema(format!(
                    "country '{name}' has unknown continent '{}'",
                    row.continent
                ))
            })?;
            if seen.insert(name.clone()) {
                countries.push(ZiCountry { name, continent });
            }
        }
        if countries.is_empty() {
            return Err(ZiError::schema("country table is empty"));
        }

        let tables = Self {
            countries,
            aliases,
            domestic: DOMESTIC_COUNTRY.to_string(),
            border_bucket: false,
        };
        let dangling = tables.dangling_aliases();
        if !dangling.is_empty() {
            log::warn!(
                "{} alias targets are not canonical countries and will resolve to 'inconnue': {:?}",
                dangling.len(),
                dangling
            );
        }
        log::debug!(
            "geography tables loaded: {} countries, {} aliases",
            tables.countries.len(),
            tables.aliases.len()
        );
        Ok(tables)
    }

    pub fn from_csv_str(source: &str, aliases: ZiAliasTable) -> Result<Self> {
        Self::from_csv_reader(source.as_bytes(), aliases)
    }

    /// Copy with the bordering countries moved into [`ZiContinent::Voisin`].
    pub fn with_border_bucket(&self) -> Self {
        let mut next = self.clone();
        for country in &mut next.countries {
            if BORDER_COUNTRIES.contains(&country.name.as_str()) {
                country.continent = ZiContinent::Voisin;
            }
        }
        next.border_bucket = true;
        next
    }

    pub fn with_aliases(&self, aliases: ZiAliasTable) -> Self {
        let mut next = self.clone();
        next.aliases = aliases;
        next
    }

    pub fn countries(&self) -> &[ZiCountry] {
        &self.countries
    }

    pub fn aliases(&self) -> &ZiAliasTable {
        &self.aliases
    }

    pub fn domestic(&self) -> &str {
        &self.domestic
    }

    pub fn has_border_bucket(&self) -> bool {
        self.border_bucket
    }

    pub fn continent_of(&self, country: &str) -> Option<ZiContinent> {
        self.countries
            .iter()
            .find(|c| c.name == country)
            .map(|c| c.continent)
    }

    /// Countries of one bucket, in table order.
    pub fn bucket(&self, continent: ZiContinent) -> Vec<&str> {
        self.countries
            .iter()
            .filter(|c| c.continent == continent)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// First canonical country contained in `value`.
    pub fn find_country(&self, value: &str) -> Option<&ZiCountry> {
        self.countries
            .iter()
            .find(|c| value.contains(c.name.as_str()))
    }

    /// Alias targets that are neither canonical countries nor the domestic one.
    pub fn dangling_aliases(&self) -> Vec<&str> {
        let mut dangling: Vec<&str> = self
            .aliases
            .entries()
            .iter()
            .map(|(_, country)| country.as_str())
            .filter(|country| *country != self.domestic && self.continent_of(country).is_none())
            .collect();
        dangling.sort_unstable();
        dangling.dedup();
        dangling
    }
}

fn clean_country_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    lowered
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Observed spellings, abbreviations, cities and regions mapped to a
/// canonical country. Order matters.
pub const ALIASES: &[(&str, &str)] = &[
    ("belg", "belgique"),
    ("spa", "espagne"),
    ("basque", "espagne"),
    ("pays", "pays-bas"),
    ("ital", "italie"),
    ("royaume", "royaume-uni"),
    ("grande bretagne", "royaume-uni"),
    ("grande-bretagne", "royaume-uni"),
    ("angleterre", "royaume-uni"),
    ("portugal", "portugal"),
    ("tha", "thaïlande"),
    ("cosse", "royaume-uni"),
    ("taiwan", "taïwan"),
    ("deutschland", "allemagne"),
    ("normandie", "france"),
    ("switzerland", "suisse"),
    ("franche", "france"),
    ("unis", "états-unis"),
    ("allemagne", "allemagne"),
    ("écosse", "royaume-uni"),
    ("germany", "allemagne"),
    ("uk", "royaume-uni"),
    ("irlande", "royaume-uni"),
    ("bretagne", "france"),
    ("europ", "roumanie"),
    ("agriculture ue", "roumanie"),
    ("quateur", "équateur"),
    ("indien", "inde"),
    ("ue / non ue", "roumanie"),
    ("pacifique nord-est", "états-unis"),
    ("india", "inde"),
    ("proven", "france"),
    ("antille", "république dominicaine"),
    ("kingdom", "royaume-uni"),
    ("alaska", "états-unis"),
    ("corse", "france"),
    ("latine", "brésil"),
    ("ue,non ue", "roumanie"),
    ("usa", "états-unis"),
    ("agricultura ue,agricultura no ue", "roumanie"),
    ("u.e.", "roumanie"),
    ("china", "chine"),
    ("ivoire", "côte d'ivoire"),
    ("savoie", "france"),
    ("ue et non ue", "roumanie"),
    ("fao 34", "sénégal"),
    ("champagne", "france"),
    ("nouvelle zélande", "nouvelle-zélande"),
    ("agen", "france"),
    ("gironde", "france"),
    ("schweiz", "suisse"),
    ("élaboré en ue", "roumanie"),
    ("vezelay", "france"),
    ("poitou", "france"),
    ("salvetat", "france"),
    ("domingue", "république dominicaine"),
    ("aisne", "france"),
    ("suri", "suriname"),
    ("polska", "pologne"),
    ("poland", "pologne"),
    ("mer du nord", "norvège"),
    ("lorraine", "france"),
    ("auvergne", "france"),
    ("ecuador", "équateur"),
    ("alpe", "france"),
    ("atlantique centre est", "sénégal"),
    ("atlantique nord est", "norvège"),
    ("loire", "france"),
    ("atlantique sud-ouest", "brésil"),
    ("atlantique n-e", "norvège"),
    ("asie", "chine"),
    ("england", "royaume-uni"),
    ("origine u", "roumanie"),
    ("floride", "états-unis"),
    ("riesling", "france"),
    ("palestine", "liban"),
    ("deutchland", "allemagne"),
    ("algerie", "algérie"),
    ("pacifique centre-ouest", "indonésie"),
    ("modène", "italie"),
    ("holland", "pays-bas"),
    ("dordogne", "france"),
    ("isigny", "france"),
    ("afrique", "sénégal"),
    ("mornant", "france"),
    ("strasbourg", "france"),
    ("manche", "royaume-uni"),
    ("bordeaux", "france"),
    ("gréce", "grèce"),
    ("costa", "costa rica"),
    ("fao 51", "madagascar"),
    ("voges", "france"),
    ("adour", "france"),
    ("roussillon", "france"),
    ("rhône", "france"),
    ("guat", "guatemala"),
    ("gascogne", "france"),
    ("south africa", "afrique du sud"),
    ("aveyron", "france"),
    ("galmier", "france"),
    ("abbat", "france"),
    ("australi", "australie"),
    ("garonne", "france"),
    ("ducey", "france"),
    ("royaume-uni", "royaume-uni"),
    ("sri", "sri lanka"),
    ("gard", "france"),
    ("mouilleron", "france"),
    ("québec", "canada"),
    ("atlantique nord-est", "norvège"),
    ("fao 67", "états-unis"),
    ("fao 61", "japon"),
    ("soultzmatt", "france"),
    ("cère", "france"),
    ("mézières", "france"),
    ("landes", "france"),
    ("atlantique centre-est", "sénégal"),
    ("bayonne", "france"),
    ("revel", "france"),
    ("fao 71", "indonésie"),
    ("zeland", "nouvelle-zélande"),
    ("figeac", "france"),
    ("laval", "france"),
    ("aquitaine", "france"),
    ("tschechien", "république tchèque"),
    ("pyrénées", "france"),
    ("cotentin", "france"),
    ("anjou", "france"),
    ("auggen", "allemagne"),
    ("amérique", "mexique"),
    ("orme", "france"),
    ("fa0 27", "norvège"),
    ("suede", "suède"),
    ("scotland", "royaume-uni"),
    ("région centre", "france"),
    ("trente", "italie"),
    ("forez", "france"),
    ("malaysie", "malaisie"),
    ("sicile", "italie"),
    ("benoît", "france"),
    ("pacifique centre est", "états-unis"),
    ("maromme", "france"),
    ("morbihan", "france"),
    ("pacifique nord-ouest", "japon"),
    ("brasil", "brésil"),
    ("ouest pacifique", "nouvelle-zélande"),
    ("tcheque", "république tchèque"),
    ("peru", "pérou"),
    ("jamaika", "jamaïque"),
    ("toscane", "italie"),
    ("austria", "autriche"),
    ("adeline", "france"),
    ("guérande", "france"),
    ("mayenne", "france"),
    ("noirmoutier", "france"),
    ("est-centre", "france"),
    ("giovanni", "italie"),
    ("gers", "france"),
    ("alba la romaine", "france"),
    ("beuste", "france"),
    ("vosge", "france"),
    ("arcachon", "france"),
    ("ventoux", "france"),
    ("chateau", "france"),
    ("vitell", "france"),
    ("hépar", "france"),
    ("montargis", "france"),
    ("vermont", "france"),
    ("belle", "france"),
    ("việt nam", "vietnam"),
    ("neuseeland", "nouvelle-zélande"),
    ("uae", "émirats arabes unis"),
    ("saverne", "france"),
    ("ariège", "france"),
    ("netherland", "pays-bas"),
    ("ardèche", "france"),
    ("jean", "france"),
    ("marcel", "france"),
    ("hawaï", "états-unis"),
    ("abbaye", "france"),
    ("salvador", "salvador"),
    ("norv", "norvège"),
    ("itália", "italie"),
    ("belique", "belgique"),
    ("perou", "pérou"),
    ("guyane", "guyane française"),
    ("korea", "corée du sud"),
    ("beauregard", "france"),
    ("fran", "france"),
    ("jap", "japon"),
    ("picardie", "france"),
    ("igp", "france"),
    ("laiterie", "france"),
    ("betteville", "france"),
    ("jura", "france"),
    ("avelin", "france"),
    ("armagnac", "france"),
    ("pays d'oc", "france"),
    ("mont-dore", "france"),
    ("nederland", "pays-bas"),
    ("bordelais", "france"),
    ("catalan", "espagne"),
    ("coruna", "espagne"),
    ("evian", "france"),
    ("évian", "france"),
    ("boulogne", "france"),
    ("vallée des gaves", "france"),
    ("angers", "france"),
    ("norway", "norvège"),
    ("chile", "chili"),
    ("couëron", "france"),
    ("montclar", "france"),
    ("crète", "grèce"),
    ("bali", "indonésie"),
    ("poska", "pologne"),
    ("charente", "france"),
    ("macédoine", "macédoine du nord"),
    ("ain", "france"),
    ("languedoc", "france"),
    ("vendée", "france"),
    ("flandres", "belgique"),
    ("saumur", "france"),
    ("conserverie", "france"),
    ("écrins", "france"),
    ("sweden", "suède"),
    ("mexi", "mexique"),
    ("cavaillon", "france"),
    ("limousin", "france"),
    ("genève", "suisse"),
    ("64290", "france"),
    ("fromagerie", "france"),
    ("gênes", "italie"),
    ("alemanha", "allemagne"),
    ("méxique", "mexique"),
    ("compiègne", "france"),
    ("sud de l'europe", "italie"),
    ("pays bas", "pays-bas"),
    ("grenoble", "france"),
    ("camargue", "france"),
    ("zealand", "nouvelle-zélande"),
    ("guilliers", "france"),
    ("orléan", "france"),
    ("clairvic", "france"),
    ("isr", "israël"),
    ("tibet", "chine"),
    ("plancoët", "france"),
    ("argentina", "argentine"),
    ("puys", "france"),
    ("marceles", "france"),
    ("gouzon", "france"),
    ("rietberg", "allemagne"),
    ("nillère", "france"),
    ("villers", "france"),
    ("maulévrier", "france"),
    ("vaucluse", "france"),
    ("românia", "roumanie"),
    ("atlantique centre-ouest", "mexique"),
    ("bresse", "france"),
    ("mont blanc", "france"),
    ("tourouzelle", "france"),
    ("source", "france"),
    ("wissous", "france"),
    ("léman", "suisse"),
    ("carcassonne", "france"),
    ("chelles", "france"),
    ("grece", "grèce"),
    ("greece", "grèce"),
    ("malville", "france"),
    ("himalaya", "chine"),
    ("léognan", "france"),
    ("île de ré", "france"),
    ("bergues", "france"),
    ("swaziland", "eswatini"),
    ("montélimar", "france"),
    ("améric", "mexique"),
    ("kénya", "kenya"),
    ("tailandia", "thaïlande"),
    ("saint ouen", "france"),
    ("sarthe", "france"),
    ("yunnan", "chine"),
    ("charenton", "france"),
    ("méditerr", "grèce"),
    ("cee", "roumanie"),
    ("alsace", "france"),
    ("alemania", "allemagne"),
    ("marseille", "france"),
    ("states", "états-unis"),
    ("californie", "états-unis"),
    ("montreuil", "france"),
    ("gemenos", "france"),
    ("danmark", "danemark"),
    ("vill", "france"),
    ("lithuanie", "lituanie"),
    ("griechenland", "grèce"),
    ("denmark", "danemark"),
    ("amsterdam", "pays-bas"),
    ("gouvieux", "france"),
    ("bourgogne", "france"),
    ("bourgb", "france"),
    ("bourge", "france"),
    ("bocage", "france"),
    ("abbé", "france"),
    ("annecy", "france"),
    ("flavigny", "france"),
    ("sarbazan", "france"),
    ("mesnay", "france"),
    ("serbia", "serbie"),
    ("fleurance", "france"),
    ("aubagne", "france"),
    ("louâtre", "france"),
    ("dijon", "france"),
    ("finland", "finlande"),
    ("larressore", "france"),
    ("delvert", "france"),
    ("fécamp", "france"),
    ("vertou", "france"),
    ("limoges", "france"),
    ("massegros", "france"),
    ("россия", "russie"),
];
