use crate::domain::lead::Lead;

pub const CSV_FILE_NAME: &str = "leads.csv";

const CSV_HEADER: &str = "Business Name,Website,Potential Pain Point,Personalized Pitch";

pub fn to_csv(leads: &[Lead]) -> String {
    let mut rows = vec![CSV_HEADER.to_string()];

    for lead in leads {
        let row = [
            csv_field(&lead.business_name),
            csv_field(&lead.website),
            csv_field(&lead.potential_pain_point),
            csv_field(&lead.personalized_pitch),
        ]
        .join(",");
        rows.push(row);
    }

    rows.join("\n")
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn to_clipboard_text(leads: &[Lead]) -> String {
    leads
        .iter()
        .map(|lead| {
            format!(
                "Business Name: {}\nWebsite: {}\nPain Point: {}\nPitch: {}",
                lead.business_name,
                lead.website,
                lead.potential_pain_point,
                lead.personalized_pitch
            )
        })
        .collect::<Vec<String>>()
        .join("\n\n---\n\n")
}
