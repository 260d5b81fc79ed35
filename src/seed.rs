//! Built-in demo dataset for the Estação Tech network.
//!
//! Users, schools, classrooms, schedules, inventory and finance are fixed
//! tables. Students are generated: ten per classroom with random names,
//! grades and thirty days of weighted-random attendance ending at `today`.
//! All randomness goes through a `StdRng` seeded by the caller, so the same
//! `(seed, today)` pair always yields the same dataset.

use crate::model::{
    Attendance, AttendanceStatus, Classroom, DayOfWeek, FinancialRecord, Grade, InventoryItem,
    RecordKind, Role, Schedule, School, Student, User,
};
use crate::store::Dataset;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 20250301;

const STUDENTS_PER_CLASSROOM: usize = 10;
const ATTENDANCE_DAYS: i64 = 30;

const FIRST_NAMES: [&str; 10] = [
    "Ana", "João", "Maria", "Pedro", "Lucas", "Juliana", "Mateus", "Carla", "Bruno", "Larissa",
];
const LAST_NAMES: [&str; 10] = [
    "Silva",
    "Santos",
    "Oliveira",
    "Souza",
    "Pereira",
    "Lima",
    "Costa",
    "Ferreira",
    "Rodrigues",
    "Almeida",
];

pub fn generate(seed: u64, today: NaiveDate) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let schedules = schedules();
    let mut classrooms = classrooms();
    for classroom in classrooms.iter_mut() {
        classroom.schedule = schedules
            .iter()
            .filter(|s| s.classroom_id == classroom.id)
            .cloned()
            .collect();
    }
    let students = generate_students(&mut rng, &classrooms, today);

    Dataset {
        users: users(),
        schools: schools(),
        classrooms,
        schedules,
        students,
        inventory: inventory(),
        finance: finance(),
    }
}

fn generate_students(rng: &mut StdRng, classrooms: &[Classroom], today: NaiveDate) -> Vec<Student> {
    let mut students: Vec<Student> = Vec::with_capacity(classrooms.len() * STUDENTS_PER_CLASSROOM);
    for classroom in classrooms {
        for _ in 0..STUDENTS_PER_CLASSROOM {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let student_id = format!("student{}", students.len() + 1);

            let attendance = (0..ATTENDANCE_DAYS)
                .map(|j| Attendance {
                    id: format!("attendance{}_{}", student_id, j),
                    student_id: student_id.clone(),
                    date: today - Duration::days(j),
                    status: weighted_status(rng.gen::<f64>()),
                })
                .collect();

            let grade = match rng.gen_range(0..4) {
                0 => Grade::A,
                1 => Grade::B,
                2 => Grade::C,
                _ => Grade::D,
            };
            let portrait_set = if rng.gen_bool(0.5) { "women" } else { "men" };

            students.push(Student {
                id: student_id,
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}@aluno.estacaotech.com",
                    first.to_lowercase(),
                    last.to_lowercase()
                ),
                school_id: classroom.school_id.clone(),
                classroom_id: classroom.id.clone(),
                grade,
                attendance,
                profile_picture: Some(format!(
                    "https://randomuser.me/api/portraits/{}/{}.jpg",
                    portrait_set,
                    students.len() % 70 + 1
                )),
            });
        }
    }
    students
}

/// 80% present, 15% late, 5% absent.
fn weighted_status(roll: f64) -> AttendanceStatus {
    if roll < 0.8 {
        AttendanceStatus::Present
    } else if roll < 0.95 {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Absent
    }
}

fn user(id: &str, name: &str, email: &str, role: Role, schools: &[&str], portrait: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        school_ids: schools.iter().map(|s| s.to_string()).collect(),
        profile_picture: Some(format!("https://randomuser.me/api/portraits/{}.jpg", portrait)),
    }
}

fn users() -> Vec<User> {
    vec![
        user(
            "user1",
            "Secretário Demo",
            "secretario@estacaotech.com",
            Role::Secretary,
            &["school1", "school2", "school3"],
            "men/1",
        ),
        user("user2", "Maria Silva", "maria@estacaotech.com", Role::Director, &["school1"], "women/2"),
        user("user3", "João Oliveira", "joao@estacaotech.com", Role::Director, &["school2"], "men/3"),
        user("user4", "Ana Santos", "ana@estacaotech.com", Role::Director, &["school3"], "women/4"),
        user("user5", "Carlos Mendes", "carlos@estacaotech.com", Role::Teacher, &["school1"], "men/5"),
        user("user6", "Patrícia Lima", "patricia@estacaotech.com", Role::Teacher, &["school1"], "women/6"),
        user("user7", "Roberto Alves", "roberto@estacaotech.com", Role::Teacher, &["school1"], "men/7"),
        user("user8", "Fernanda Costa", "fernanda@estacaotech.com", Role::Teacher, &["school2"], "women/8"),
        user("user9", "Miguel Souza", "miguel@estacaotech.com", Role::Teacher, &["school2"], "men/9"),
        user("user10", "Juliana Ferreira", "juliana@estacaotech.com", Role::Teacher, &["school2"], "women/10"),
        user("user11", "Lucas Dias", "lucas@estacaotech.com", Role::Teacher, &["school3"], "men/11"),
        user("user12", "Camila Rocha", "camila@estacaotech.com", Role::Teacher, &["school3"], "women/12"),
        user("user13", "Paulo Gomes", "paulo@estacaotech.com", Role::Teacher, &["school3"], "men/13"),
    ]
}

fn school(id: &str, name: &str, address: &str, director: &str, teachers: [&str; 3], rooms: [&str; 3]) -> School {
    School {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        director_id: director.to_string(),
        teacher_ids: teachers.iter().map(|s| s.to_string()).collect(),
        classroom_ids: rooms.iter().map(|s| s.to_string()).collect(),
    }
}

fn schools() -> Vec<School> {
    vec![
        school(
            "school1",
            "Escola Estação Central",
            "Rua das Flores, 123, Centro",
            "user2",
            ["user5", "user6", "user7"],
            ["classroom1", "classroom2", "classroom3"],
        ),
        school(
            "school2",
            "Escola Estação Norte",
            "Av. dos Ipês, 456, Zona Norte",
            "user3",
            ["user8", "user9", "user10"],
            ["classroom4", "classroom5", "classroom6"],
        ),
        school(
            "school3",
            "Escola Estação Sul",
            "Praça da Liberdade, 789, Zona Sul",
            "user4",
            ["user11", "user12", "user13"],
            ["classroom7", "classroom8", "classroom9"],
        ),
    ]
}

fn classrooms() -> Vec<Classroom> {
    [
        ("classroom1", "Sala 101", "school1", "user5", 30),
        ("classroom2", "Sala 102", "school1", "user6", 25),
        ("classroom3", "Sala 103", "school1", "user7", 35),
        ("classroom4", "Sala 201", "school2", "user8", 28),
        ("classroom5", "Sala 202", "school2", "user9", 32),
        ("classroom6", "Sala 203", "school2", "user10", 30),
        ("classroom7", "Sala 301", "school3", "user11", 34),
        ("classroom8", "Sala 302", "school3", "user12", 26),
        ("classroom9", "Sala 303", "school3", "user13", 30),
    ]
    .into_iter()
    .map(|(id, name, school_id, teacher_id, capacity)| Classroom {
        id: id.to_string(),
        name: name.to_string(),
        school_id: school_id.to_string(),
        teacher_id: teacher_id.to_string(),
        capacity,
        schedule: Vec::new(),
    })
    .collect()
}

fn schedules() -> Vec<Schedule> {
    [
        ("schedule1", "classroom1", "user5", "Matemática", DayOfWeek::Monday, "08:00", "10:00"),
        ("schedule2", "classroom1", "user5", "Matemática", DayOfWeek::Wednesday, "08:00", "10:00"),
        ("schedule3", "classroom2", "user6", "Português", DayOfWeek::Tuesday, "10:00", "12:00"),
        ("schedule4", "classroom2", "user6", "Português", DayOfWeek::Thursday, "10:00", "12:00"),
        ("schedule5", "classroom3", "user7", "Ciências", DayOfWeek::Monday, "13:00", "15:00"),
        ("schedule6", "classroom3", "user7", "Ciências", DayOfWeek::Friday, "13:00", "15:00"),
    ]
    .into_iter()
    .map(|(id, classroom_id, teacher_id, subject, day, start, end)| Schedule {
        id: id.to_string(),
        classroom_id: classroom_id.to_string(),
        teacher_id: teacher_id.to_string(),
        subject: subject.to_string(),
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
    })
    .collect()
}

fn inventory() -> Vec<InventoryItem> {
    [
        ("item1", "Notebooks", "Materiais", 150, "school1", 50, 15.0),
        ("item2", "Lápis", "Materiais", 500, "school1", 100, 1.5),
        ("item3", "Livros de Português", "Didáticos", 80, "school1", 30, 45.0),
        ("item4", "Livros de Matemática", "Didáticos", 75, "school1", 30, 48.0),
        ("item5", "Computadores", "Equipamentos", 25, "school1", 10, 1500.0),
        ("item6", "Notebooks", "Materiais", 120, "school2", 50, 15.0),
        ("item7", "Lápis", "Materiais", 450, "school2", 100, 1.5),
        ("item8", "Livros de Ciências", "Didáticos", 70, "school2", 30, 42.0),
        ("item9", "Projetores", "Equipamentos", 12, "school2", 5, 800.0),
        ("item16", "Canetas Esferográficas", "Materiais", 400, "school2", 150, 2.0),
        ("item17", "Régua 30cm", "Materiais", 120, "school2", 50, 3.5),
        ("item18", "Tesoura Escolar", "Materiais", 80, "school3", 30, 4.0),
        ("item19", "Cola Branca", "Materiais", 150, "school3", 50, 3.0),
        ("item10", "Notebooks", "Materiais", 130, "school3", 50, 15.0),
        ("item11", "Canetas", "Materiais", 580, "school3", 150, 2.0),
        ("item12", "Livros de História", "Didáticos", 65, "school3", 30, 40.0),
        ("item13", "Tablets", "Equipamentos", 18, "school3", 5, 6.0),
        ("item14", "Cadernos Universitários", "Materiais", 200, "school1", 80, 12.0),
        ("item15", "Borracha", "Materiais", 300, "school1", 100, 0.5),
    ]
    .into_iter()
    .map(|(id, name, category, quantity, school_id, min_quantity, price)| InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        school_id: school_id.to_string(),
        min_quantity,
        price,
    })
    .collect()
}

fn finance() -> Vec<FinancialRecord> {
    use RecordKind::{Expense, Income};
    [
        ("finance1", "school1", Income, 25000.0, "Mensalidades", "Mensalidades do mês de Março", (2025, 3, 10)),
        ("finance2", "school1", Expense, 15000.0, "Salários", "Pagamento de salários - Março", (2025, 3, 5)),
        ("finance3", "school1", Expense, 2500.0, "Materiais", "Compra de materiais escolares", (2025, 3, 15)),
        ("finance4", "school1", Income, 5000.0, "Atividades Extras", "Cursos extracurriculares", (2025, 3, 20)),
        ("finance5", "school2", Income, 22000.0, "Mensalidades", "Mensalidades do mês de Março", (2025, 3, 10)),
        ("finance6", "school2", Expense, 13000.0, "Salários", "Pagamento de salários - Março", (2025, 3, 5)),
        ("finance7", "school2", Expense, 3000.0, "Infraestrutura", "Manutenção do prédio", (2025, 3, 18)),
        ("finance8", "school3", Income, 26000.0, "Mensalidades", "Mensalidades do mês de Março", (2025, 3, 10)),
        ("finance9", "school3", Expense, 14500.0, "Salários", "Pagamento de salários - Março", (2025, 3, 5)),
        ("finance10", "school3", Expense, 4200.0, "Equipamentos", "Compra de equipamentos tecnológicos", (2025, 3, 22)),
    ]
    .into_iter()
    .filter_map(|(id, school_id, kind, amount, category, description, (y, m, d))| {
        Some(FinancialRecord {
            id: id.to_string(),
            school_id: school_id.to_string(),
            kind,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)?,
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).expect("date")
    }

    #[test]
    fn same_seed_same_students() {
        let a = generate(7, today());
        let b = generate(7, today());
        assert_eq!(a.students, b.students);
    }

    #[test]
    fn different_seed_changes_students_but_not_fixed_tables() {
        let a = generate(1, today());
        let b = generate(2, today());
        assert_ne!(a.students, b.students);
        assert_eq!(a.users, b.users);
        assert_eq!(a.inventory, b.inventory);
    }

    #[test]
    fn ten_students_per_classroom_with_thirty_days_newest_first() {
        let ds = generate(DEFAULT_SEED, today());
        assert_eq!(ds.students.len(), 90);
        for classroom in &ds.classrooms {
            let n = ds
                .students
                .iter()
                .filter(|s| s.classroom_id == classroom.id)
                .count();
            assert_eq!(n, 10, "{}", classroom.id);
        }
        let s = &ds.students[0];
        assert_eq!(s.attendance.len(), 30);
        assert_eq!(s.attendance[0].date, today());
        assert!(s.attendance.windows(2).all(|w| w[0].date > w[1].date));
        assert!(s.email.ends_with("@aluno.estacaotech.com"));
    }

    #[test]
    fn classrooms_carry_their_schedules() {
        let ds = generate(DEFAULT_SEED, today());
        let room1 = ds.classrooms.iter().find(|c| c.id == "classroom1").expect("room");
        assert_eq!(room1.schedule.len(), 2);
        let room9 = ds.classrooms.iter().find(|c| c.id == "classroom9").expect("room");
        assert!(room9.schedule.is_empty());
    }

    #[test]
    fn weighted_status_thresholds() {
        assert_eq!(weighted_status(0.0), AttendanceStatus::Present);
        assert_eq!(weighted_status(0.79), AttendanceStatus::Present);
        assert_eq!(weighted_status(0.8), AttendanceStatus::Late);
        assert_eq!(weighted_status(0.95), AttendanceStatus::Absent);
    }
}
