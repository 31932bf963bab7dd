//! Display names for table identifiers.

use crate::api::{INSTRUCTOR_PREFIX, LAB_PREFIX, STUDENT_PREFIX};

/// Map a raw table identifier to a display label.
///
/// `TT-Sem-sem3_cse` becomes `Sem 3 - CSE`; instructor and lab ids lose their
/// prefix; anything else is returned unchanged.
pub fn normalize(table_id: &str) -> String {
    if let Some(rest) = table_id.strip_prefix(STUDENT_PREFIX) {
        let parts: Vec<&str> = rest.split('_').collect();
        if parts.len() >= 2 {
            let semester = parts[0].replacen("sem", "Sem ", 1);
            let branch = parts[1].to_uppercase();
            return format!("{} - {}", semester, branch);
        }
        return rest.to_string();
    }

    for prefix in [INSTRUCTOR_PREFIX, LAB_PREFIX] {
        if let Some(rest) = table_id.strip_prefix(prefix) {
            return rest.to_string();
        }
    }

    table_id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_names() {
        assert_eq!(normalize("TT-Sem-sem3_cse"), "Sem 3 - CSE");
        assert_eq!(normalize("TT-Sem-sem1_it"), "Sem 1 - IT");
        // only the first two parts are used
        assert_eq!(normalize("TT-Sem-sem5_ece_b"), "Sem 5 - ECE");
    }

    #[test]
    fn test_student_name_without_branch() {
        assert_eq!(normalize("TT-Sem-sem3"), "sem3");
        assert_eq!(normalize("TT-Sem-"), "");
    }

    #[test]
    fn test_student_name_without_sem_marker() {
        assert_eq!(normalize("TT-Sem-3_cse"), "3 - CSE");
    }

    #[test]
    fn test_instructor_and_lab_names() {
        assert_eq!(normalize("TT-Inst-JSmith"), "JSmith");
        assert_eq!(normalize("TT-Lab-L1"), "L1");
        assert_eq!(normalize("TT-Lab-TT-Lab-L1"), "TT-Lab-L1");
    }

    #[test]
    fn test_unrecognized_names_are_identity() {
        assert_eq!(normalize("Unrelated-X"), "Unrelated-X");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("tt-inst-lower"), "tt-inst-lower");
    }
}
