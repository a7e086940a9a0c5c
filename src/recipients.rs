use std::io::Read;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use crate::errors::RecipientsError;

/// One row of the recipient list
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Recipient {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Zip", default)]
    pub zip: String,
}

impl Recipient {
    /// Returns the location part of a weather query, zip code is preferred over city and state
    ///
    /// # Arguments
    ///
    /// * 'country_code' - two letter country code
    pub fn location_query(&self, country_code: &str) -> (&'static str, String) {
        if !self.zip.is_empty() {
            ("zip", format!("{},{}", self.zip, country_code))
        } else if !self.state.is_empty() {
            ("q", format!("{},{},{}", self.city, state_code(&self.state), country_code))
        } else {
            ("q", format!("{},{}", self.city, country_code))
        }
    }
}

/// Loads the recipient list from a csv file with the headers Name, Email, City, State and Zip
///
/// # Arguments
///
/// * 'path' - path to the csv file
pub fn load_recipients(path: &str) -> Result<Vec<Recipient>, RecipientsError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_recipients(file)
}

fn read_recipients<R: Read>(reader: R) -> Result<Vec<Recipient>, RecipientsError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut recipients: Vec<Recipient> = Vec::new();
    for row in reader.deserialize() {
        recipients.push(row?);
    }

    Ok(recipients)
}

const STATES: [(&str, &str); 51] = [
    ("Alabama", "AL"), ("Alaska", "AK"), ("Arizona", "AZ"), ("Arkansas", "AR"),
    ("California", "CA"), ("Colorado", "CO"), ("Connecticut", "CT"), ("Delaware", "DE"),
    ("Florida", "FL"), ("Georgia", "GA"), ("Hawaii", "HI"), ("Idaho", "ID"),
    ("Illinois", "IL"), ("Indiana", "IN"), ("Iowa", "IA"), ("Kansas", "KS"),
    ("Kentucky", "KY"), ("Louisiana", "LA"), ("Maine", "ME"), ("Maryland", "MD"),
    ("Massachusetts", "MA"), ("Michigan", "MI"), ("Minnesota", "MN"), ("Mississippi", "MS"),
    ("Missouri", "MO"), ("Montana", "MT"), ("Nebraska", "NE"), ("Nevada", "NV"),
    ("New Hampshire", "NH"), ("New Jersey", "NJ"), ("New Mexico", "NM"), ("New York", "NY"),
    ("North Carolina", "NC"), ("North Dakota", "ND"), ("Ohio", "OH"), ("Oklahoma", "OK"),
    ("Oregon", "OR"), ("Pennsylvania", "PA"), ("Rhode Island", "RI"), ("South Carolina", "SC"),
    ("South Dakota", "SD"), ("Tennessee", "TN"), ("Texas", "TX"), ("Utah", "UT"),
    ("Vermont", "VT"), ("Virginia", "VA"), ("Washington", "WA"), ("West Virginia", "WV"),
    ("Wisconsin", "WI"), ("Wyoming", "WY"), ("District of Columbia", "DC"),
];

/// Translates a US state name to its two letter code. Codes and unknown names pass through.
///
/// # Arguments
///
/// * 'state' - state name or code
pub fn state_code(state: &str) -> &str {
    if state.len() == 2 && state.chars().all(|c| c.is_ascii_uppercase()) {
        return state;
    }

    STATES.iter()
        .find(|(name, _)| *name == state)
        .map_or(state, |(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_trimmed_and_missing_columns_default() {
        let csv = "Name,Email,City\n Ada , ada@example.com ,Springfield\nBob,,\n";
        let recipients = read_recipients(csv.as_bytes()).unwrap();

        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].name, "Ada");
        assert_eq!(recipients[0].email, "ada@example.com");
        assert_eq!(recipients[0].city, "Springfield");
        assert!(recipients[0].zip.is_empty());
        assert!(recipients[1].email.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_recipients("/nonexistent/dailybrief/email-list.csv").is_err());
    }

    #[test]
    fn state_names_map_to_codes() {
        assert_eq!(state_code("New York"), "NY");
        assert_eq!(state_code("District of Columbia"), "DC");
        assert_eq!(state_code("TX"), "TX");
        assert_eq!(state_code("Ontario"), "Ontario");
    }

    #[test]
    fn zip_wins_over_city() {
        let mut r = Recipient {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            city: "Austin".to_string(),
            state: "Texas".to_string(),
            zip: "78701".to_string(),
        };
        assert_eq!(r.location_query("US"), ("zip", "78701,US".to_string()));

        r.zip.clear();
        assert_eq!(r.location_query("US"), ("q", "Austin,TX,US".to_string()));

        r.state.clear();
        assert_eq!(r.location_query("US"), ("q", "Austin,US".to_string()));
    }
}
