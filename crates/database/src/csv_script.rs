use std::{
    error::Error,
    fs::File,
    io::{Read, Write},
    path::Path,
};

/// Number of data columns in the public access point export: gov id, program,
/// install date, latitude, longitude, neighborhood, borough.
const EXPECTED_COLUMNS: usize = 7;

/// Reads a CSV export and writes one INSERT statement per record. Empty
/// fields become NULL, the coordinate columns are kept as bare numeric
/// literals, and text fields are quoted with embedded quotes doubled.
/// Records with too few columns are logged and skipped.
pub fn generate_sql_script<R, W>(reader: R, writer: &mut W) -> Result<(), Box<dyn Error>>
where
    R: Read,
    W: Write,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    for (index, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(why) => {
                log::error!("skipping unreadable CSV record {}: {}", index + 1, why);
                continue;
            }
        };
        if record.len() < EXPECTED_COLUMNS {
            log::error!(
                "skipping malformed CSV record {}: expected {} columns, found {}",
                index + 1,
                EXPECTED_COLUMNS,
                record.len()
            );
            continue;
        }
        let values = record
            .iter()
            .take(EXPECTED_COLUMNS)
            .enumerate()
            .map(|(column, field)| {
                let field = field.trim();
                if field.is_empty() {
                    "NULL".to_owned()
                } else if column == 3 || column == 4 {
                    // latitude and longitude
                    numeric_literal(field)
                } else {
                    text_literal(field)
                }
            })
            .collect::<Vec<_>>();
        writeln!(
            writer,
            "INSERT INTO access_points (gov_id, program, install_date, latitude, longitude, neighborhood, borough) VALUES ({});",
            values.join(", ")
        )?;
    }

    Ok(())
}

/// Generates the seed script from a CSV export sitting next to it, but only
/// when the script itself does not exist yet. Both paths absent is fine, the
/// seed loader tolerates a missing script.
pub fn ensure_seed_script(sql_path: &Path, csv_path: &Path) -> Result<(), Box<dyn Error>> {
    if sql_path.is_file() || !csv_path.is_file() {
        return Ok(());
    }
    let csv_file = File::open(csv_path)?;
    let mut sql_file = File::create(sql_path)?;
    generate_sql_script(csv_file, &mut sql_file)?;
    log::info!(
        "generated seed script {} from {}.",
        sql_path.display(),
        csv_path.display()
    );
    Ok(())
}

/// Strips everything that cannot be part of a plain number. A field that
/// still fails to parse is stored as NULL rather than producing a broken
/// statement.
fn numeric_literal(field: &str) -> String {
    let cleaned = field
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect::<String>();
    match cleaned.parse::<f64>() {
        Ok(value) => value.to_string(),
        Err(_) => "NULL".to_owned(),
    }
}

fn text_literal(field: &str) -> String {
    format!("'{}'", field.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::generate_sql_script;

    fn generate(csv: &str) -> Vec<String> {
        let mut output = Vec::new();
        generate_sql_script(csv.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn renders_one_insert_per_record() {
        let lines = generate(
            "idgob,programa,fecha_instalacion,latitud,longitud,colonia,alcaldia\n\
             MX_DF_CDMX_1,Internet para todos,2023-01-15,19.4326077,-99.133208,Centro,Cuauhtémoc\n",
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "INSERT INTO access_points (gov_id, program, install_date, latitude, longitude, neighborhood, borough) \
             VALUES ('MX_DF_CDMX_1', 'Internet para todos', '2023-01-15', 19.4326077, -99.133208, 'Centro', 'Cuauhtémoc');"
        );
    }

    #[test]
    fn empty_fields_become_null() {
        let lines = generate(
            "idgob,programa,fecha_instalacion,latitud,longitud,colonia,alcaldia\n\
             MX_DF_CDMX_2,,2023-01-15,,,Roma Norte,Cuauhtémoc\n",
        );

        assert_eq!(
            lines[0],
            "INSERT INTO access_points (gov_id, program, install_date, latitude, longitude, neighborhood, borough) \
             VALUES ('MX_DF_CDMX_2', NULL, '2023-01-15', NULL, NULL, 'Roma Norte', 'Cuauhtémoc');"
        );
    }

    #[test]
    fn quotes_in_text_fields_are_doubled() {
        let lines = generate(
            "idgob,programa,fecha_instalacion,latitud,longitud,colonia,alcaldia\n\
             MX_DF_CDMX_3,Program,2023-01-15,19.43,-99.13,Peralvillo 'Norte',Cuauhtémoc\n",
        );

        assert!(lines[0].contains("'Peralvillo ''Norte'''"));
    }

    #[test]
    fn unparseable_coordinates_become_null() {
        let lines = generate(
            "idgob,programa,fecha_instalacion,latitud,longitud,colonia,alcaldia\n\
             MX_DF_CDMX_4,Program,2023-01-15,n/a,-99.13,Centro,Cuauhtémoc\n",
        );

        assert!(lines[0].contains("VALUES ('MX_DF_CDMX_4', 'Program', '2023-01-15', NULL, -99.13,"));
    }

    #[test]
    fn coordinates_with_stray_characters_are_cleaned() {
        let lines = generate(
            "idgob,programa,fecha_instalacion,latitud,longitud,colonia,alcaldia\n\
             MX_DF_CDMX_5,Program,2023-01-15,\" 19.4326\",\" -99.1332\",Centro,Cuauhtémoc\n",
        );

        assert!(lines[0].contains("19.4326, -99.1332,"));
    }

    #[test]
    fn short_records_are_skipped() {
        let lines = generate(
            "idgob,programa,fecha_instalacion,latitud,longitud,colonia,alcaldia\n\
             MX_DF_CDMX_6,Program,2023-01-15\n\
             MX_DF_CDMX_7,Program,2023-01-15,19.43,-99.13,Centro,Cuauhtémoc\n",
        );

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("MX_DF_CDMX_7"));
    }
}
