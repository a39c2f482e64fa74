// In-memory record store, standing in for the host framework's database.
// Holds employee master records, their linked personnel capture sheets and
// the export history.

use shared::models::{ChildRecord, Employee, PersonnelRecord};
use std::collections::{BTreeMap, HashMap};

use crate::models::ExportHistoryEntry;

pub struct EmployeeStore {
    employees: HashMap<String, Employee>,
    /// Personnel capture sheets keyed by the linked employee id.
    personnel: HashMap<String, PersonnelRecord>,
    history: Vec<ExportHistoryEntry>,
}

impl EmployeeStore {
    pub fn new() -> Self {
        EmployeeStore {
            employees: HashMap::new(),
            personnel: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Bulk insert from a roster load. Flags are taken as given.
    pub fn insert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    pub fn insert_personnel_record(&mut self, record: PersonnelRecord) {
        self.personnel.insert(record.employee.clone(), record);
    }

    /// Save-hook path: any employee update marks the record for the next
    /// export.
    pub fn record_employee_update(&mut self, mut employee: Employee) {
        employee.marked_for_export = true;
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Save-hook path for capture sheets: updating a sheet marks the linked
    /// employee for the next export.
    pub fn record_personnel_update(&mut self, record: PersonnelRecord) {
        if let Some(employee) = self.employees.get_mut(&record.employee) {
            employee.marked_for_export = true;
        }
        self.personnel.insert(record.employee.clone(), record);
    }

    /// Attaches a child row to the personnel record of the given employee.
    /// Returns false when no personnel record exists.
    pub fn add_child(&mut self, employee_id: &str, child: ChildRecord) -> bool {
        match self.personnel.get_mut(employee_id) {
            Some(record) => {
                record.children.push(child);
                true
            }
            None => false,
        }
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn personnel_for(&self, employee_id: &str) -> Option<&PersonnelRecord> {
        self.personnel.get(employee_id)
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// All employees marked for export, grouped by company in a stable
    /// order.
    pub fn marked_by_company(&self) -> BTreeMap<String, Vec<Employee>> {
        let mut grouped: BTreeMap<String, Vec<Employee>> = BTreeMap::new();
        for employee in self.employees.values() {
            if employee.marked_for_export {
                grouped
                    .entry(employee.company.clone())
                    .or_default()
                    .push(employee.clone());
            }
        }
        for employees in grouped.values_mut() {
            employees.sort_by(|a, b| a.id.cmp(&b.id));
        }
        grouped
    }

    pub fn reset_export_flag(&mut self, id: &str) {
        if let Some(employee) = self.employees.get_mut(id) {
            employee.marked_for_export = false;
        }
    }

    /// Copies the current weekly hours into the stored value after a
    /// successful export.
    pub fn update_stored_weekly_hours(&mut self, id: &str) {
        if let Some(employee) = self.employees.get_mut(id) {
            employee.exported_weekly_hours = employee.weekly_hours;
        }
    }

    pub fn push_history(&mut self, entry: ExportHistoryEntry) {
        self.history.push(entry);
    }

    pub fn history(&self) -> &[ExportHistoryEntry] {
        &self.history
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}
